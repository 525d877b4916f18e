use core::fmt::Debug;

use crate::elf;
use crate::endian;
use crate::pod::Pod;

/// A trait for generic access to the ELF relocation entry types.
///
/// Implemented for [`elf::Rel32`], [`elf::Rela32`], [`elf::Rel64`] and [`elf::Rela64`].
/// Entries without an explicit addend return zero.
#[allow(missing_docs)]
pub trait Rel: Debug + Pod {
    type Endian: endian::Endian;

    fn r_offset(&self, endian: Self::Endian) -> u64;
    fn r_sym(&self, endian: Self::Endian) -> u32;
    fn r_type(&self, endian: Self::Endian) -> u32;
    fn r_addend(&self, endian: Self::Endian) -> i64;
}

macro_rules! impl_rel {
    ($rel:ident) => {
        impl_rel!(@impl $rel, fn r_addend(&self, _endian: Self::Endian) -> i64 {
            0
        });
    };
    ($rel:ident, addend) => {
        impl_rel!(@impl $rel, fn r_addend(&self, endian: Self::Endian) -> i64 {
            self.r_addend.get(endian).into()
        });
    };
    (@impl $rel:ident, $($addend:tt)*) => {
        impl<Endian: endian::Endian> Rel for elf::$rel<Endian> {
            type Endian = Endian;

            #[inline]
            fn r_offset(&self, endian: Self::Endian) -> u64 {
                self.r_offset.get(endian).into()
            }

            #[inline]
            fn r_sym(&self, endian: Self::Endian) -> u32 {
                elf::$rel::r_sym(self, endian)
            }

            #[inline]
            fn r_type(&self, endian: Self::Endian) -> u32 {
                elf::$rel::r_type(self, endian)
            }

            #[inline]
            $($addend)*
        }
    };
}

impl_rel!(Rel32);
impl_rel!(Rela32, addend);
impl_rel!(Rel64);
impl_rel!(Rela64, addend);

/// Return the name of a relocation type for the given machine.
pub(crate) fn relocation_type_name(e_machine: u16, r_type: u32) -> Option<&'static str> {
    match e_machine {
        elf::EM_386 => i386_name(r_type),
        elf::EM_X86_64 => x86_64_name(r_type),
        elf::EM_ARM => arm_name(r_type),
        elf::EM_AARCH64 => aarch64_name(r_type),
        elf::EM_RISCV => riscv_name(r_type),
        _ => None,
    }
}

relocation_names! {
    fn i386_name(u32) {
        elf::R_386_NONE,
        elf::R_386_32,
        elf::R_386_PC32,
        elf::R_386_GOT32,
        elf::R_386_PLT32,
        elf::R_386_COPY,
        elf::R_386_GLOB_DAT,
        elf::R_386_JMP_SLOT,
        elf::R_386_RELATIVE,
        elf::R_386_GOTOFF,
        elf::R_386_GOTPC,
        elf::R_386_TLS_TPOFF,
        elf::R_386_TLS_IE,
        elf::R_386_TLS_GOTIE,
        elf::R_386_TLS_LE,
        elf::R_386_TLS_GD,
        elf::R_386_TLS_LDM,
        elf::R_386_16,
        elf::R_386_PC16,
        elf::R_386_8,
        elf::R_386_PC8,
        elf::R_386_TLS_DTPMOD32,
        elf::R_386_TLS_DTPOFF32,
        elf::R_386_TLS_TPOFF32,
        elf::R_386_IRELATIVE,
        elf::R_386_GOT32X,
    }
}

relocation_names! {
    fn x86_64_name(u32) {
        elf::R_X86_64_NONE,
        elf::R_X86_64_64,
        elf::R_X86_64_PC32,
        elf::R_X86_64_GOT32,
        elf::R_X86_64_PLT32,
        elf::R_X86_64_COPY,
        elf::R_X86_64_GLOB_DAT,
        elf::R_X86_64_JUMP_SLOT,
        elf::R_X86_64_RELATIVE,
        elf::R_X86_64_GOTPCREL,
        elf::R_X86_64_32,
        elf::R_X86_64_32S,
        elf::R_X86_64_16,
        elf::R_X86_64_PC16,
        elf::R_X86_64_8,
        elf::R_X86_64_PC8,
        elf::R_X86_64_DTPMOD64,
        elf::R_X86_64_DTPOFF64,
        elf::R_X86_64_TPOFF64,
        elf::R_X86_64_TLSGD,
        elf::R_X86_64_TLSLD,
        elf::R_X86_64_DTPOFF32,
        elf::R_X86_64_GOTTPOFF,
        elf::R_X86_64_TPOFF32,
        elf::R_X86_64_PC64,
        elf::R_X86_64_GOTOFF64,
        elf::R_X86_64_GOTPC32,
        elf::R_X86_64_SIZE32,
        elf::R_X86_64_SIZE64,
        elf::R_X86_64_GOTPC32_TLSDESC,
        elf::R_X86_64_TLSDESC_CALL,
        elf::R_X86_64_TLSDESC,
        elf::R_X86_64_IRELATIVE,
        elf::R_X86_64_GOTPCRELX,
        elf::R_X86_64_REX_GOTPCRELX,
    }
}

relocation_names! {
    fn arm_name(u32) {
        elf::R_ARM_NONE,
        elf::R_ARM_PC24,
        elf::R_ARM_ABS32,
        elf::R_ARM_REL32,
        elf::R_ARM_THM_CALL,
        elf::R_ARM_COPY,
        elf::R_ARM_GLOB_DAT,
        elf::R_ARM_JUMP_SLOT,
        elf::R_ARM_RELATIVE,
        elf::R_ARM_GOTOFF32,
        elf::R_ARM_BASE_PREL,
        elf::R_ARM_GOT_BREL,
        elf::R_ARM_PLT32,
        elf::R_ARM_CALL,
        elf::R_ARM_JUMP24,
        elf::R_ARM_THM_JUMP24,
        elf::R_ARM_TARGET1,
        elf::R_ARM_V4BX,
        elf::R_ARM_PREL31,
        elf::R_ARM_MOVW_ABS_NC,
        elf::R_ARM_MOVT_ABS,
        elf::R_ARM_THM_MOVW_ABS_NC,
        elf::R_ARM_THM_MOVT_ABS,
        elf::R_ARM_IRELATIVE,
    }
}

relocation_names! {
    fn aarch64_name(u32) {
        elf::R_AARCH64_NONE,
        elf::R_AARCH64_ABS64,
        elf::R_AARCH64_ABS32,
        elf::R_AARCH64_ABS16,
        elf::R_AARCH64_PREL64,
        elf::R_AARCH64_PREL32,
        elf::R_AARCH64_PREL16,
        elf::R_AARCH64_MOVW_UABS_G0,
        elf::R_AARCH64_MOVW_UABS_G0_NC,
        elf::R_AARCH64_MOVW_UABS_G1,
        elf::R_AARCH64_MOVW_UABS_G1_NC,
        elf::R_AARCH64_MOVW_UABS_G2,
        elf::R_AARCH64_MOVW_UABS_G2_NC,
        elf::R_AARCH64_MOVW_UABS_G3,
        elf::R_AARCH64_ADR_PREL_LO21,
        elf::R_AARCH64_ADR_PREL_PG_HI21,
        elf::R_AARCH64_ADD_ABS_LO12_NC,
        elf::R_AARCH64_LDST8_ABS_LO12_NC,
        elf::R_AARCH64_TSTBR14,
        elf::R_AARCH64_CONDBR19,
        elf::R_AARCH64_JUMP26,
        elf::R_AARCH64_CALL26,
        elf::R_AARCH64_LDST16_ABS_LO12_NC,
        elf::R_AARCH64_LDST32_ABS_LO12_NC,
        elf::R_AARCH64_LDST64_ABS_LO12_NC,
        elf::R_AARCH64_LDST128_ABS_LO12_NC,
        elf::R_AARCH64_ADR_GOT_PAGE,
        elf::R_AARCH64_LD64_GOT_LO12_NC,
        elf::R_AARCH64_COPY,
        elf::R_AARCH64_GLOB_DAT,
        elf::R_AARCH64_JUMP_SLOT,
        elf::R_AARCH64_RELATIVE,
        elf::R_AARCH64_TLS_DTPMOD64,
        elf::R_AARCH64_TLS_DTPREL64,
        elf::R_AARCH64_TLS_TPREL64,
        elf::R_AARCH64_TLSDESC,
        elf::R_AARCH64_IRELATIVE,
    }
}

relocation_names! {
    fn riscv_name(u32) {
        elf::R_RISCV_NONE,
        elf::R_RISCV_32,
        elf::R_RISCV_64,
        elf::R_RISCV_RELATIVE,
        elf::R_RISCV_COPY,
        elf::R_RISCV_JUMP_SLOT,
        elf::R_RISCV_TLS_DTPMOD32,
        elf::R_RISCV_TLS_DTPMOD64,
        elf::R_RISCV_TLS_DTPREL32,
        elf::R_RISCV_TLS_DTPREL64,
        elf::R_RISCV_TLS_TPREL32,
        elf::R_RISCV_TLS_TPREL64,
        elf::R_RISCV_BRANCH,
        elf::R_RISCV_JAL,
        elf::R_RISCV_CALL,
        elf::R_RISCV_CALL_PLT,
        elf::R_RISCV_GOT_HI20,
        elf::R_RISCV_TLS_GOT_HI20,
        elf::R_RISCV_TLS_GD_HI20,
        elf::R_RISCV_PCREL_HI20,
        elf::R_RISCV_PCREL_LO12_I,
        elf::R_RISCV_PCREL_LO12_S,
        elf::R_RISCV_HI20,
        elf::R_RISCV_LO12_I,
        elf::R_RISCV_LO12_S,
        elf::R_RISCV_TPREL_HI20,
        elf::R_RISCV_TPREL_LO12_I,
        elf::R_RISCV_TPREL_LO12_S,
        elf::R_RISCV_TPREL_ADD,
        elf::R_RISCV_ADD8,
        elf::R_RISCV_ADD16,
        elf::R_RISCV_ADD32,
        elf::R_RISCV_ADD64,
        elf::R_RISCV_SUB8,
        elf::R_RISCV_SUB16,
        elf::R_RISCV_SUB32,
        elf::R_RISCV_SUB64,
        elf::R_RISCV_ALIGN,
        elf::R_RISCV_RVC_BRANCH,
        elf::R_RISCV_RVC_JUMP,
        elf::R_RISCV_RELAX,
        elf::R_RISCV_SUB6,
        elf::R_RISCV_SET6,
        elf::R_RISCV_SET8,
        elf::R_RISCV_SET16,
        elf::R_RISCV_SET32,
        elf::R_RISCV_32_PCREL,
        elf::R_RISCV_IRELATIVE,
    }
}

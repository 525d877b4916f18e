use core::convert::TryFrom;

use crate::macho;

/// Return the name of a relocation type for the given CPU type.
pub(crate) fn relocation_type_name(cputype: u32, r_type: u32) -> Option<&'static str> {
    let r_type = u8::try_from(r_type).ok()?;
    match cputype {
        macho::CPU_TYPE_X86 => generic_name(r_type),
        macho::CPU_TYPE_X86_64 => x86_64_name(r_type),
        macho::CPU_TYPE_ARM => arm_name(r_type),
        macho::CPU_TYPE_ARM64 | macho::CPU_TYPE_ARM64_32 => arm64_name(r_type),
        macho::CPU_TYPE_POWERPC | macho::CPU_TYPE_POWERPC64 => powerpc_name(r_type),
        _ => None,
    }
}

relocation_names! {
    fn generic_name(u8) {
        macho::GENERIC_RELOC_VANILLA,
        macho::GENERIC_RELOC_PAIR,
        macho::GENERIC_RELOC_SECTDIFF,
        macho::GENERIC_RELOC_PB_LA_PTR,
        macho::GENERIC_RELOC_LOCAL_SECTDIFF,
        macho::GENERIC_RELOC_TLV,
    }
}

relocation_names! {
    fn x86_64_name(u8) {
        macho::X86_64_RELOC_UNSIGNED,
        macho::X86_64_RELOC_SIGNED,
        macho::X86_64_RELOC_BRANCH,
        macho::X86_64_RELOC_GOT_LOAD,
        macho::X86_64_RELOC_GOT,
        macho::X86_64_RELOC_SUBTRACTOR,
        macho::X86_64_RELOC_SIGNED_1,
        macho::X86_64_RELOC_SIGNED_2,
        macho::X86_64_RELOC_SIGNED_4,
        macho::X86_64_RELOC_TLV,
    }
}

relocation_names! {
    fn arm_name(u8) {
        macho::ARM_RELOC_VANILLA,
        macho::ARM_RELOC_PAIR,
        macho::ARM_RELOC_SECTDIFF,
        macho::ARM_RELOC_LOCAL_SECTDIFF,
        macho::ARM_RELOC_PB_LA_PTR,
        macho::ARM_RELOC_BR24,
        macho::ARM_THUMB_RELOC_BR22,
        macho::ARM_THUMB_32BIT_BRANCH,
        macho::ARM_RELOC_HALF,
        macho::ARM_RELOC_HALF_SECTDIFF,
    }
}

relocation_names! {
    fn arm64_name(u8) {
        macho::ARM64_RELOC_UNSIGNED,
        macho::ARM64_RELOC_SUBTRACTOR,
        macho::ARM64_RELOC_BRANCH26,
        macho::ARM64_RELOC_PAGE21,
        macho::ARM64_RELOC_PAGEOFF12,
        macho::ARM64_RELOC_GOT_LOAD_PAGE21,
        macho::ARM64_RELOC_GOT_LOAD_PAGEOFF12,
        macho::ARM64_RELOC_POINTER_TO_GOT,
        macho::ARM64_RELOC_TLVP_LOAD_PAGE21,
        macho::ARM64_RELOC_TLVP_LOAD_PAGEOFF12,
        macho::ARM64_RELOC_ADDEND,
        macho::ARM64_RELOC_AUTHENTICATED_POINTER,
    }
}

relocation_names! {
    fn powerpc_name(u8) {
        macho::PPC_RELOC_VANILLA,
        macho::PPC_RELOC_PAIR,
        macho::PPC_RELOC_BR14,
        macho::PPC_RELOC_BR24,
        macho::PPC_RELOC_HI16,
        macho::PPC_RELOC_LO16,
        macho::PPC_RELOC_HA16,
        macho::PPC_RELOC_LO14,
        macho::PPC_RELOC_SECTDIFF,
        macho::PPC_RELOC_PB_LA_PTR,
        macho::PPC_RELOC_HI16_SECTDIFF,
        macho::PPC_RELOC_LO16_SECTDIFF,
        macho::PPC_RELOC_HA16_SECTDIFF,
        macho::PPC_RELOC_JBSR,
        macho::PPC_RELOC_LO14_SECTDIFF,
        macho::PPC_RELOC_LOCAL_SECTDIFF,
    }
}

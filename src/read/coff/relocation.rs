use core::convert::TryFrom;

use crate::pe;

/// Return the name of a relocation type for the given machine.
pub(crate) fn relocation_type_name(machine: u16, r_type: u32) -> Option<&'static str> {
    let r_type = u16::try_from(r_type).ok()?;
    match machine {
        pe::IMAGE_FILE_MACHINE_I386 => i386_name(r_type),
        pe::IMAGE_FILE_MACHINE_AMD64 => amd64_name(r_type),
        pe::IMAGE_FILE_MACHINE_ARM | pe::IMAGE_FILE_MACHINE_THUMB | pe::IMAGE_FILE_MACHINE_ARMNT => {
            arm_name(r_type)
        }
        pe::IMAGE_FILE_MACHINE_ARM64 => arm64_name(r_type),
        _ => None,
    }
}

relocation_names! {
    fn i386_name(u16) {
        pe::IMAGE_REL_I386_ABSOLUTE,
        pe::IMAGE_REL_I386_DIR16,
        pe::IMAGE_REL_I386_REL16,
        pe::IMAGE_REL_I386_DIR32,
        pe::IMAGE_REL_I386_DIR32NB,
        pe::IMAGE_REL_I386_SEG12,
        pe::IMAGE_REL_I386_SECTION,
        pe::IMAGE_REL_I386_SECREL,
        pe::IMAGE_REL_I386_TOKEN,
        pe::IMAGE_REL_I386_SECREL7,
        pe::IMAGE_REL_I386_REL32,
    }
}

relocation_names! {
    fn amd64_name(u16) {
        pe::IMAGE_REL_AMD64_ABSOLUTE,
        pe::IMAGE_REL_AMD64_ADDR64,
        pe::IMAGE_REL_AMD64_ADDR32,
        pe::IMAGE_REL_AMD64_ADDR32NB,
        pe::IMAGE_REL_AMD64_REL32,
        pe::IMAGE_REL_AMD64_REL32_1,
        pe::IMAGE_REL_AMD64_REL32_2,
        pe::IMAGE_REL_AMD64_REL32_3,
        pe::IMAGE_REL_AMD64_REL32_4,
        pe::IMAGE_REL_AMD64_REL32_5,
        pe::IMAGE_REL_AMD64_SECTION,
        pe::IMAGE_REL_AMD64_SECREL,
        pe::IMAGE_REL_AMD64_SECREL7,
        pe::IMAGE_REL_AMD64_TOKEN,
        pe::IMAGE_REL_AMD64_SREL32,
        pe::IMAGE_REL_AMD64_PAIR,
        pe::IMAGE_REL_AMD64_SSPAN32,
    }
}

relocation_names! {
    fn arm_name(u16) {
        pe::IMAGE_REL_ARM_ABSOLUTE,
        pe::IMAGE_REL_ARM_ADDR32,
        pe::IMAGE_REL_ARM_ADDR32NB,
        pe::IMAGE_REL_ARM_BRANCH24,
        pe::IMAGE_REL_ARM_BRANCH11,
        pe::IMAGE_REL_ARM_TOKEN,
        pe::IMAGE_REL_ARM_BLX24,
        pe::IMAGE_REL_ARM_BLX11,
        pe::IMAGE_REL_ARM_REL32,
        pe::IMAGE_REL_ARM_SECTION,
        pe::IMAGE_REL_ARM_SECREL,
        pe::IMAGE_REL_ARM_MOV32,
        pe::IMAGE_REL_THUMB_MOV32,
        pe::IMAGE_REL_THUMB_BRANCH20,
        pe::IMAGE_REL_THUMB_BRANCH24,
        pe::IMAGE_REL_THUMB_BLX23,
        pe::IMAGE_REL_ARM_PAIR,
    }
}

relocation_names! {
    fn arm64_name(u16) {
        pe::IMAGE_REL_ARM64_ABSOLUTE,
        pe::IMAGE_REL_ARM64_ADDR32,
        pe::IMAGE_REL_ARM64_ADDR32NB,
        pe::IMAGE_REL_ARM64_BRANCH26,
        pe::IMAGE_REL_ARM64_PAGEBASE_REL21,
        pe::IMAGE_REL_ARM64_REL21,
        pe::IMAGE_REL_ARM64_PAGEOFFSET_12A,
        pe::IMAGE_REL_ARM64_PAGEOFFSET_12L,
        pe::IMAGE_REL_ARM64_SECREL,
        pe::IMAGE_REL_ARM64_SECREL_LOW12A,
        pe::IMAGE_REL_ARM64_SECREL_HIGH12A,
        pe::IMAGE_REL_ARM64_SECREL_LOW12L,
        pe::IMAGE_REL_ARM64_TOKEN,
        pe::IMAGE_REL_ARM64_SECTION,
        pe::IMAGE_REL_ARM64_ADDR64,
        pe::IMAGE_REL_ARM64_BRANCH19,
        pe::IMAGE_REL_ARM64_BRANCH14,
        pe::IMAGE_REL_ARM64_REL32,
    }
}

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::elf;
use crate::endian;
use crate::pod::{Bytes, Pod};
use crate::read::{DataRange, ReadError, Result};

use super::{FileHeader, SectionHeader};

/// A trait for generic access to [`elf::Dyn32`] and [`elf::Dyn64`].
#[allow(missing_docs)]
pub trait Dyn: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;

    fn d_tag(&self, endian: Self::Endian) -> Self::Word;
    fn d_val(&self, endian: Self::Endian) -> Self::Word;

    /// Get the tag as a `u64`.
    fn tag(&self, endian: Self::Endian) -> u64 {
        self.d_tag(endian).into()
    }

    /// Get the value as a `u64`.
    fn val(&self, endian: Self::Endian) -> u64 {
        self.d_val(endian).into()
    }
}

macro_rules! impl_dyn {
    ($dyn:ident, $word:ty) => {
        impl<Endian: endian::Endian> Dyn for elf::$dyn<Endian> {
            type Word = $word;
            type Endian = Endian;

            field_getters! {
                d_tag: $word,
                d_val: $word,
            }
        }
    };
}

impl_dyn!(Dyn32, u32);
impl_dyn!(Dyn64, u64);

/// The `DT_NEEDED` entries of an ELF file.
#[derive(Debug, Default, Clone)]
pub(crate) struct NeededLibraries {
    /// The dynamic string table.
    pub strings: DataRange,
    /// The string table offsets of the library names.
    pub names: Vec<u32>,
}

impl NeededLibraries {
    /// Parse the `DT_NEEDED` entries of the first `SHT_DYNAMIC` section.
    ///
    /// The string table is found through the `sh_link` of the dynamic section.
    pub fn parse<Elf: FileHeader>(
        endian: Elf::Endian,
        data: &[u8],
        sections: &[Elf::SectionHeader],
    ) -> Result<Self> {
        let section = match sections
            .iter()
            .find(|section| section.sh_type(endian) == elf::SHT_DYNAMIC)
        {
            Some(section) => section,
            None => return Ok(NeededLibraries::default()),
        };

        let range = section.data_range(endian);
        let bytes = range.bytes(data).read_error("Invalid ELF dynamic section range")?;
        let count = bytes.len() / core::mem::size_of::<Elf::Dyn>();
        let dynamics = Bytes(bytes)
            .read_slice::<Elf::Dyn>(count)
            .read_error("Invalid ELF dynamic section data")?;

        let strings = sections
            .get(section.sh_link(endian) as usize)
            .read_error("Invalid ELF dynamic string table index")?
            .data_range(endian);

        let mut names = Vec::new();
        for d in dynamics {
            let tag = d.tag(endian);
            if tag == u64::from(elf::DT_NULL) {
                break;
            }
            if tag == u64::from(elf::DT_NEEDED) {
                let offset = d.val(endian);
                if offset > u64::from(u32::MAX) {
                    return Err(crate::read::Error::malformed(
                        "Invalid ELF DT_NEEDED string offset",
                    ));
                }
                names.push(offset as u32);
            }
        }
        Ok(NeededLibraries { strings, names })
    }
}

use core::fmt::Debug;

use crate::elf;
use crate::endian;
use crate::pod::Pod;
use crate::read::{DataRange, SectionKind};

use super::FileHeader;

/// A trait for generic access to [`elf::SectionHeader32`] and [`elf::SectionHeader64`].
#[allow(missing_docs)]
pub trait SectionHeader: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;
    type Elf: FileHeader<Word = Self::Word, Endian = Self::Endian>;

    fn sh_name(&self, endian: Self::Endian) -> u32;
    fn sh_type(&self, endian: Self::Endian) -> u32;
    fn sh_flags(&self, endian: Self::Endian) -> Self::Word;
    fn sh_addr(&self, endian: Self::Endian) -> Self::Word;
    fn sh_offset(&self, endian: Self::Endian) -> Self::Word;
    fn sh_size(&self, endian: Self::Endian) -> Self::Word;
    fn sh_link(&self, endian: Self::Endian) -> u32;
    fn sh_info(&self, endian: Self::Endian) -> u32;
    fn sh_addralign(&self, endian: Self::Endian) -> Self::Word;
    fn sh_entsize(&self, endian: Self::Endian) -> Self::Word;

    /// Return the offset and size of the section in the file.
    ///
    /// Returns `None` for sections that have no data in the file.
    fn file_range(&self, endian: Self::Endian) -> Option<(u64, u64)> {
        if self.sh_type(endian) == elf::SHT_NOBITS {
            None
        } else {
            Some((self.sh_offset(endian).into(), self.sh_size(endian).into()))
        }
    }

    /// Return the location of the section data.
    ///
    /// The range is empty for sections that have no data in the file.
    fn data_range(&self, endian: Self::Endian) -> DataRange {
        match self.file_range(endian) {
            Some((offset, size)) => DataRange::new(offset, size),
            None => DataRange::default(),
        }
    }

    /// Return the section flags, widened to 64 bits.
    fn flags(&self, endian: Self::Endian) -> u64 {
        self.sh_flags(endian).into()
    }

    fn has_flag(&self, endian: Self::Endian, flag: u32) -> bool {
        self.flags(endian) & u64::from(flag) != 0
    }

    /// Classify the section.
    fn kind(&self, endian: Self::Endian) -> SectionKind {
        let flags = self.flags(endian);
        let has = |flag: u32| flags & u64::from(flag) != 0;
        match self.sh_type(endian) {
            elf::SHT_PROGBITS
            | elf::SHT_INIT_ARRAY
            | elf::SHT_FINI_ARRAY
            | elf::SHT_PREINIT_ARRAY => {
                if has(elf::SHF_ALLOC) {
                    if has(elf::SHF_EXECINSTR) {
                        SectionKind::Text
                    } else if has(elf::SHF_TLS) {
                        SectionKind::Tls
                    } else if has(elf::SHF_WRITE) {
                        SectionKind::Data
                    } else if has(elf::SHF_STRINGS) {
                        SectionKind::ReadOnlyString
                    } else {
                        SectionKind::ReadOnlyData
                    }
                } else if has(elf::SHF_STRINGS) {
                    SectionKind::OtherString
                } else {
                    SectionKind::Other
                }
            }
            elf::SHT_NOBITS => {
                if has(elf::SHF_TLS) {
                    SectionKind::UninitializedTls
                } else {
                    SectionKind::UninitializedData
                }
            }
            elf::SHT_NOTE => SectionKind::Note,
            elf::SHT_NULL
            | elf::SHT_SYMTAB
            | elf::SHT_STRTAB
            | elf::SHT_RELA
            | elf::SHT_HASH
            | elf::SHT_DYNAMIC
            | elf::SHT_REL
            | elf::SHT_DYNSYM
            | elf::SHT_GROUP
            | elf::SHT_SYMTAB_SHNDX
            | elf::SHT_GNU_HASH
            | elf::SHT_GNU_VERDEF
            | elf::SHT_GNU_VERNEED
            | elf::SHT_GNU_VERSYM => SectionKind::Metadata,
            _ => SectionKind::Unknown,
        }
    }

    /// Return true if the section contains executable code.
    fn is_text(&self, endian: Self::Endian) -> bool {
        self.has_flag(endian, elf::SHF_EXECINSTR)
    }

    /// Return true if the section contains initialized writable data.
    fn is_data(&self, endian: Self::Endian) -> bool {
        self.has_flag(endian, elf::SHF_ALLOC)
            && self.has_flag(endian, elf::SHF_WRITE)
            && self.sh_type(endian) != elf::SHT_NOBITS
    }

    /// Return true if the section is zero filled when loaded.
    fn is_bss(&self, endian: Self::Endian) -> bool {
        self.has_flag(endian, elf::SHF_ALLOC)
            && self.has_flag(endian, elf::SHF_WRITE)
            && self.sh_type(endian) == elf::SHT_NOBITS
    }

    /// Return true if the section contains relocations.
    fn is_relocation(&self, endian: Self::Endian) -> bool {
        let sh_type = self.sh_type(endian);
        sh_type == elf::SHT_REL || sh_type == elf::SHT_RELA
    }
}

macro_rules! impl_section_header {
    ($header:ident, $file:ident, $word:ty) => {
        impl<Endian: endian::Endian> SectionHeader for elf::$header<Endian> {
            type Word = $word;
            type Endian = Endian;
            type Elf = elf::$file<Endian>;

            field_getters! {
                sh_name: u32,
                sh_type: u32,
                sh_flags: $word,
                sh_addr: $word,
                sh_offset: $word,
                sh_size: $word,
                sh_link: u32,
                sh_info: u32,
                sh_addralign: $word,
                sh_entsize: $word,
            }
        }
    };
}

impl_section_header!(SectionHeader32, FileHeader32, u32);
impl_section_header!(SectionHeader64, FileHeader64, u64);

/// A trait for generic access to [`elf::CompressionHeader32`] and [`elf::CompressionHeader64`].
#[allow(missing_docs)]
pub trait CompressionHeader: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;

    fn ch_type(&self, endian: Self::Endian) -> u32;
    fn ch_size(&self, endian: Self::Endian) -> Self::Word;
    fn ch_addralign(&self, endian: Self::Endian) -> Self::Word;
}

macro_rules! impl_compression_header {
    ($header:ident, $word:ty) => {
        impl<Endian: endian::Endian> CompressionHeader for elf::$header<Endian> {
            type Word = $word;
            type Endian = Endian;

            field_getters! {
                ch_type: u32,
                ch_size: $word,
                ch_addralign: $word,
            }
        }
    };
}

impl_compression_header!(CompressionHeader32, u32);
impl_compression_header!(CompressionHeader64, u64);

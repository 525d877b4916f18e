use core::fmt::Debug;

use crate::endian;
use crate::macho;
use crate::pod::Pod;
use crate::read::{DataRange, DataTable, SectionIndex, SymbolFlags, SymbolSection, SymbolType};

use super::Section;

/// The `LC_SYMTAB` symbol table, recorded as offsets into the file data.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SymbolTable {
    pub symbols: DataTable,
    pub strings: DataRange,
}

/// A trait for generic access to [`macho::Nlist32`] and [`macho::Nlist64`].
#[allow(missing_docs)]
pub trait Nlist: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;

    fn n_strx(&self, endian: Self::Endian) -> u32;
    fn n_type(&self) -> u8;
    fn n_sect(&self) -> u8;
    fn n_desc(&self, endian: Self::Endian) -> u16;
    fn n_value(&self, endian: Self::Endian) -> Self::Word;

    /// Return true if this is a symbolic debugging entry.
    fn is_stab(&self) -> bool {
        self.n_type() & macho::N_STAB != 0
    }

    fn is_undefined(&self) -> bool {
        let n_type = self.n_type();
        n_type & macho::N_STAB == 0 && n_type & macho::N_TYPE == macho::N_UNDF
    }

    /// Common symbols are undefined symbols with a non-zero size in `n_value`.
    fn is_common(&self, endian: Self::Endian) -> bool {
        let n_value: u64 = self.n_value(endian).into();
        self.is_undefined() && n_value != 0
    }

    fn is_external(&self) -> bool {
        self.n_type() & macho::N_EXT != 0
    }

    /// Return the section that the symbol is defined in.
    ///
    /// `n_sect` is one based, but section indices are zero based.
    fn section(&self, endian: Self::Endian) -> SymbolSection {
        if self.is_stab() {
            return SymbolSection::None;
        }
        match self.n_type() & macho::N_TYPE {
            macho::N_UNDF => {
                if self.is_common(endian) {
                    SymbolSection::Common
                } else {
                    SymbolSection::Undefined
                }
            }
            macho::N_ABS => SymbolSection::Absolute,
            macho::N_SECT => match self.n_sect() {
                macho::NO_SECT => SymbolSection::Unknown,
                n_sect => SymbolSection::Section(SectionIndex(usize::from(n_sect) - 1)),
            },
            _ => SymbolSection::Unknown,
        }
    }

    fn symbol_type<S: Section<Endian = Self::Endian>>(
        &self,
        endian: Self::Endian,
        section: Option<&S>,
    ) -> SymbolType {
        if self.is_stab() {
            return SymbolType::Debug;
        }
        if self.is_common(endian) {
            return SymbolType::Data;
        }
        match self.n_type() & macho::N_TYPE {
            macho::N_UNDF => SymbolType::Unknown,
            macho::N_SECT => match section {
                Some(section) if section.is_text(endian) => SymbolType::Function,
                _ => SymbolType::Data,
            },
            _ => SymbolType::Other,
        }
    }

    fn flags<S: Section<Endian = Self::Endian>>(
        &self,
        endian: Self::Endian,
        section: Option<&S>,
    ) -> SymbolFlags {
        let mut flags = SymbolFlags::NONE;
        if self.is_external() {
            flags |= SymbolFlags::GLOBAL;
        }
        if self.n_desc(endian) & (macho::N_WEAK_REF | macho::N_WEAK_DEF) != 0 {
            flags |= SymbolFlags::WEAK;
        }
        if self.is_common(endian) {
            flags |= SymbolFlags::COMMON;
        } else if self.is_undefined() {
            flags |= SymbolFlags::UNDEFINED;
        }
        if !self.is_stab() && self.n_type() & macho::N_TYPE == macho::N_ABS {
            flags |= SymbolFlags::ABSOLUTE;
        }
        if let Some(section) = section {
            if section.is_thread_local(endian) {
                flags |= SymbolFlags::THREAD_LOCAL;
            }
        }
        if self.is_stab() {
            flags |= SymbolFlags::FORMAT_SPECIFIC;
        }
        flags
    }

    /// Return the character that `nm` prints for this symbol.
    fn nm_char<S: Section<Endian = Self::Endian>>(
        &self,
        endian: Self::Endian,
        section: Option<&S>,
    ) -> char {
        if self.is_stab() {
            return '-';
        }
        let c = match self.n_type() & macho::N_TYPE {
            macho::N_UNDF => {
                if self.is_common(endian) {
                    'c'
                } else {
                    'u'
                }
            }
            macho::N_ABS => 'a',
            macho::N_INDR => 'i',
            macho::N_SECT => match section.map(|s| (s.segment_name(), s.name())) {
                Some((b"__TEXT", b"__text")) => 't',
                Some((b"__DATA", b"__data")) => 'd',
                Some((b"__DATA", b"__bss")) => 'b',
                _ => 's',
            },
            _ => '?',
        };
        if self.is_external() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

macro_rules! impl_nlist {
    ($nlist:ident, $word:ty) => {
        impl<Endian: endian::Endian> Nlist for macho::$nlist<Endian> {
            type Word = $word;
            type Endian = Endian;

            fn n_type(&self) -> u8 {
                self.n_type
            }

            fn n_sect(&self) -> u8 {
                self.n_sect
            }

            field_getters! {
                n_strx: u32,
                n_desc: u16,
                n_value: $word,
            }
        }
    };
}

impl_nlist!(Nlist32, u32);
impl_nlist!(Nlist64, u64);

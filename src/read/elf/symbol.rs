use core::fmt::Debug;

use crate::elf;
use crate::endian;
use crate::pod::Pod;
use crate::read::{DataRange, DataTable, SectionIndex, SymbolFlags, SymbolSection, SymbolType};

/// A symbol table in an ELF file, recorded as offsets into the file data.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SymbolTable {
    /// The index of the `SHT_SYMTAB` or `SHT_DYNSYM` section.
    pub section: Option<SectionIndex>,
    pub symbols: DataTable,
    pub strings: DataRange,
    /// The `SHT_SYMTAB_SHNDX` entries, if any.
    pub shndx: DataTable,
}

/// A trait for generic access to [`elf::Sym32`] and [`elf::Sym64`].
#[allow(missing_docs)]
pub trait Sym: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;

    fn st_name(&self, endian: Self::Endian) -> u32;
    fn st_info(&self) -> u8;
    fn st_other(&self) -> u8;
    fn st_shndx(&self, endian: Self::Endian) -> u16;
    fn st_value(&self, endian: Self::Endian) -> Self::Word;
    fn st_size(&self, endian: Self::Endian) -> Self::Word;

    #[inline]
    fn st_bind(&self) -> u8 {
        self.st_info() >> 4
    }

    #[inline]
    fn st_type(&self) -> u8 {
        self.st_info() & 0xf
    }

    /// Return true if the symbol is undefined.
    #[inline]
    fn is_undefined(&self, endian: Self::Endian) -> bool {
        self.st_shndx(endian) == elf::SHN_UNDEF
    }

    /// Return true if the symbol is a common symbol.
    #[inline]
    fn is_common(&self, endian: Self::Endian) -> bool {
        self.st_shndx(endian) == elf::SHN_COMMON || self.st_type() == elf::STT_COMMON
    }

    /// Return true if the symbol is absolute.
    #[inline]
    fn is_absolute(&self, endian: Self::Endian) -> bool {
        self.st_shndx(endian) == elf::SHN_ABS
    }

    /// Return the section that the symbol is defined in.
    ///
    /// `xindex` is the entry in the `SHT_SYMTAB_SHNDX` section, if present.
    fn section(&self, endian: Self::Endian, xindex: Option<u32>) -> SymbolSection {
        match self.st_shndx(endian) {
            elf::SHN_UNDEF => SymbolSection::Undefined,
            elf::SHN_ABS => {
                if self.st_type() == elf::STT_FILE {
                    SymbolSection::None
                } else {
                    SymbolSection::Absolute
                }
            }
            elf::SHN_COMMON => SymbolSection::Common,
            elf::SHN_XINDEX => match xindex {
                Some(index) => SymbolSection::Section(SectionIndex(index as usize)),
                None => SymbolSection::Unknown,
            },
            index if index < elf::SHN_LORESERVE => {
                SymbolSection::Section(SectionIndex(index as usize))
            }
            _ => SymbolSection::Unknown,
        }
    }

    fn symbol_type(&self, endian: Self::Endian) -> SymbolType {
        if self.is_undefined(endian) {
            return SymbolType::Unknown;
        }
        match self.st_type() {
            elf::STT_NOTYPE => SymbolType::Unknown,
            elf::STT_OBJECT | elf::STT_COMMON | elf::STT_TLS => SymbolType::Data,
            elf::STT_FUNC | elf::STT_GNU_IFUNC => SymbolType::Function,
            elf::STT_SECTION => SymbolType::Debug,
            elf::STT_FILE => SymbolType::File,
            _ => SymbolType::Other,
        }
    }

    /// Return the flags of the symbol.
    ///
    /// `name` is used to detect ARM mapping symbols.
    fn flags(&self, endian: Self::Endian, e_machine: u16, name: &[u8]) -> SymbolFlags {
        let mut flags = SymbolFlags::NONE;
        if self.is_undefined(endian) {
            flags |= SymbolFlags::UNDEFINED;
        }
        match self.st_bind() {
            elf::STB_LOCAL => {}
            elf::STB_WEAK => flags |= SymbolFlags::GLOBAL | SymbolFlags::WEAK,
            _ => flags |= SymbolFlags::GLOBAL,
        }
        if self.is_absolute(endian) {
            flags |= SymbolFlags::ABSOLUTE;
        }
        if self.is_common(endian) {
            flags |= SymbolFlags::COMMON;
        }
        match self.st_type() {
            elf::STT_TLS => flags |= SymbolFlags::THREAD_LOCAL,
            elf::STT_SECTION | elf::STT_FILE => flags |= SymbolFlags::FORMAT_SPECIFIC,
            _ => {}
        }
        if is_mapping_symbol(e_machine, name) {
            flags |= SymbolFlags::FORMAT_SPECIFIC;
        }
        flags
    }

    /// Return the character that `nm` prints for this symbol.
    ///
    /// `section` is the header of the section that the symbol is defined in,
    /// with its name.
    fn nm_char<S>(&self, endian: Self::Endian, section: Option<(&S, &[u8])>) -> char
    where
        S: super::SectionHeader<Endian = Self::Endian>,
    {
        let bind = self.st_bind();
        let is_object = self.st_type() == elf::STT_OBJECT;
        if self.is_undefined(endian) {
            return match (bind, is_object) {
                (elf::STB_WEAK, true) => 'v',
                (elf::STB_WEAK, false) => 'w',
                _ => 'U',
            };
        }
        if bind == elf::STB_WEAK {
            return if is_object { 'V' } else { 'W' };
        }
        if self.st_type() == elf::STT_GNU_IFUNC {
            return 'i';
        }

        if self.is_common(endian) {
            return 'C';
        }

        let c = if self.is_absolute(endian) {
            'a'
        } else if let Some((section, name)) = section {
            if name.starts_with(b".debug") {
                return 'N';
            } else if section.has_flag(endian, elf::SHF_EXECINSTR) {
                't'
            } else if !section.has_flag(endian, elf::SHF_ALLOC) {
                'n'
            } else if section.sh_type(endian) == elf::SHT_NOBITS {
                'b'
            } else if section.has_flag(endian, elf::SHF_WRITE) {
                'd'
            } else {
                'r'
            }
        } else {
            return '?';
        };

        if bind == elf::STB_LOCAL {
            c
        } else {
            c.to_ascii_uppercase()
        }
    }
}

/// Return true for the ARM and AArch64 mapping symbols, such as `$a`, `$d.1` or `$x`.
fn is_mapping_symbol(e_machine: u16, name: &[u8]) -> bool {
    if e_machine != elf::EM_ARM && e_machine != elf::EM_AARCH64 {
        return false;
    }
    match name {
        [b'$', b'a', rest @ ..]
        | [b'$', b'd', rest @ ..]
        | [b'$', b't', rest @ ..]
        | [b'$', b'x', rest @ ..] => rest.first().map_or(true, |&c| c == b'.'),
        _ => false,
    }
}

macro_rules! impl_sym {
    ($sym:ident, $word:ty) => {
        impl<Endian: endian::Endian> Sym for elf::$sym<Endian> {
            type Word = $word;
            type Endian = Endian;

            #[inline]
            fn st_info(&self) -> u8 {
                self.st_info
            }

            #[inline]
            fn st_other(&self) -> u8 {
                self.st_other
            }

            field_getters! {
                st_name: u32,
                st_shndx: u16,
                st_value: $word,
                st_size: $word,
            }
        }
    };
}

impl_sym!(Sym32, u32);
impl_sym!(Sym64, u64);

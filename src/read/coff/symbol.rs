use crate::endian::LittleEndian as LE;
use crate::pe;
use crate::pod::Bytes;
use crate::read::{
    fixed_name, DataRange, DataTable, ReadError, Result, SectionIndex, StringTable, SymbolFlags,
    SymbolSection, SymbolType,
};

/// The COFF symbol table, recorded as offsets into the file data.
///
/// The string table directly follows the symbols. Offsets into the string
/// table include its 4 byte length field.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct SymbolTable {
    pub symbols: DataTable,
    pub strings: DataRange,
}

impl SymbolTable {
    /// Locate the symbol table and string table from the file header.
    pub fn parse(header: &pe::ImageFileHeader, data: &[u8]) -> Result<Self> {
        let offset = header.pointer_to_symbol_table.get(LE);
        if offset == 0 {
            return Ok(SymbolTable::default());
        }
        let count = header.number_of_symbols.get(LE);
        let symbols = DataTable::parse::<pe::ImageSymbol>(data, offset.into(), count.into())
            .read_error("Invalid COFF symbol table offset or size")?;

        let strings_offset = symbols.offset + symbols.count * pe::IMAGE_SIZEOF_SYMBOL;
        let length = Bytes(data)
            .read_at::<crate::endian::U32<LE>>(strings_offset)
            .read_error("Missing COFF string table")?
            .get(LE);
        let strings = DataRange::new(strings_offset as u64, length.into());
        strings
            .bytes(data)
            .read_error("Invalid COFF string table length")?;
        Ok(SymbolTable { symbols, strings })
    }

    pub fn strings<'data>(&self, data: &'data [u8]) -> StringTable<'data> {
        StringTable::from_range(data, self.strings)
    }

    pub fn symbol<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data pe::ImageSymbol> {
        self.symbols
            .get::<pe::ImageSymbol>(data, index)
            .read_error("Invalid COFF symbol index")
    }

    /// Return the auxiliary records that follow the symbol at `index`.
    pub fn aux_bytes<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        let symbol = self.symbol(data, index)?;
        let count = usize::from(symbol.number_of_aux_symbols);
        let offset = index
            .checked_add(1)
            .and_then(|next| next.checked_mul(pe::IMAGE_SIZEOF_SYMBOL))
            .and_then(|delta| delta.checked_add(self.symbols.offset))
            .read_error("Invalid COFF symbol index")?;
        Bytes(data)
            .read_bytes_at(offset, count * pe::IMAGE_SIZEOF_SYMBOL)
            .map(|bytes| bytes.0)
            .read_error("Invalid COFF auxiliary symbol count")
    }

    /// Return the symbol name.
    ///
    /// File symbols store the name in the auxiliary records.
    pub fn name<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        let symbol = self.symbol(data, index)?;
        if symbol.storage_class == pe::IMAGE_SYM_CLASS_FILE && symbol.number_of_aux_symbols > 0 {
            return Ok(fixed_name(self.aux_bytes(data, index)?));
        }
        symbol.name(self.strings(data))
    }
}

impl pe::ImageSymbol {
    /// Return the name for a symbol that stores it in its own record.
    ///
    /// A zero first word means the name is at an offset in the string table.
    pub(crate) fn name<'data>(&'data self, strings: StringTable<'data>) -> Result<&'data [u8]> {
        if self.name[..4] == [0; 4] {
            let offset = u32::from_le_bytes([self.name[4], self.name[5], self.name[6], self.name[7]]);
            strings
                .get(offset)
                .read_error("Invalid COFF symbol name offset")
        } else {
            Ok(fixed_name(&self.name))
        }
    }

    /// The section number, sign extended so the reserved values are negative.
    #[inline]
    pub(crate) fn section_number(&self) -> i32 {
        i32::from(self.section_number.get(LE) as i16)
    }

    #[inline]
    pub(crate) fn value(&self) -> u32 {
        self.value.get(LE)
    }

    pub(crate) fn is_external(&self) -> bool {
        self.storage_class == pe::IMAGE_SYM_CLASS_EXTERNAL
    }

    pub(crate) fn is_weak_external(&self) -> bool {
        self.storage_class == pe::IMAGE_SYM_CLASS_WEAK_EXTERNAL
    }

    pub(crate) fn is_undefined(&self) -> bool {
        self.is_external()
            && self.section_number() == pe::IMAGE_SYM_UNDEFINED
            && self.value() == 0
    }

    /// Common symbols are undefined externals with a non-zero size in `value`.
    pub(crate) fn is_common(&self) -> bool {
        self.is_external()
            && self.section_number() == pe::IMAGE_SYM_UNDEFINED
            && self.value() != 0
    }

    pub(crate) fn is_absolute(&self) -> bool {
        self.section_number() == pe::IMAGE_SYM_ABSOLUTE
    }

    pub(crate) fn is_debug(&self) -> bool {
        self.section_number() == pe::IMAGE_SYM_DEBUG
    }

    /// A static symbol with auxiliary records that describes a whole section.
    pub(crate) fn is_section_definition(&self) -> bool {
        self.storage_class == pe::IMAGE_SYM_CLASS_STATIC
            && self.number_of_aux_symbols > 0
            && self.value() == 0
            && self.section_number() > 0
    }

    pub(crate) fn is_function(&self) -> bool {
        self.typ.get(LE) >> pe::IMAGE_SYM_DTYPE_SHIFT == pe::IMAGE_SYM_DTYPE_FUNCTION
    }

    /// Return the section that the symbol is defined in.
    ///
    /// Section numbers are one based, but section indices are zero based.
    pub(crate) fn section(&self) -> SymbolSection {
        match self.section_number() {
            number if number > 0 => SymbolSection::Section(SectionIndex(number as usize - 1)),
            pe::IMAGE_SYM_UNDEFINED => {
                if self.is_common() {
                    SymbolSection::Common
                } else if self.is_external() || self.is_weak_external() {
                    SymbolSection::Undefined
                } else {
                    SymbolSection::None
                }
            }
            pe::IMAGE_SYM_ABSOLUTE => SymbolSection::Absolute,
            pe::IMAGE_SYM_DEBUG => SymbolSection::None,
            _ => SymbolSection::Unknown,
        }
    }

    pub(crate) fn symbol_type(&self) -> SymbolType {
        if self.is_function() {
            return SymbolType::Function;
        }
        if self.is_undefined() || self.is_weak_external() {
            return SymbolType::Unknown;
        }
        if self.is_common() {
            return SymbolType::Data;
        }
        match self.storage_class {
            pe::IMAGE_SYM_CLASS_FILE => return SymbolType::File,
            pe::IMAGE_SYM_CLASS_SECTION => return SymbolType::Debug,
            _ => {}
        }
        if self.is_debug() || self.is_section_definition() {
            return SymbolType::Debug;
        }
        if self.section_number() > 0 {
            SymbolType::Data
        } else {
            SymbolType::Other
        }
    }

    pub(crate) fn flags(&self) -> SymbolFlags {
        let mut flags = SymbolFlags::NONE;
        if self.is_external() {
            flags |= SymbolFlags::GLOBAL;
        }
        if self.is_weak_external() {
            flags |= SymbolFlags::GLOBAL | SymbolFlags::WEAK;
        }
        if self.is_absolute() {
            flags |= SymbolFlags::ABSOLUTE;
        }
        if self.storage_class == pe::IMAGE_SYM_CLASS_FILE || self.is_section_definition() {
            flags |= SymbolFlags::FORMAT_SPECIFIC;
        }
        if self.is_common() {
            flags |= SymbolFlags::COMMON;
        } else if self.is_undefined() || self.is_weak_external() {
            flags |= SymbolFlags::UNDEFINED;
        }
        flags
    }

    /// Return the character that `nm` prints for this symbol.
    ///
    /// `section` is the header and name of the section the symbol is defined in.
    pub(crate) fn nm_char(&self, section: Option<(&pe::ImageSectionHeader, &[u8])>) -> char {
        if self.is_weak_external() {
            return 'w';
        }
        let c = if self.is_undefined() {
            'u'
        } else if self.is_common() {
            'c'
        } else if self.is_absolute() {
            'a'
        } else if self.is_debug() {
            'n'
        } else {
            match section {
                Some((header, name)) => {
                    let characteristics = header.characteristics();
                    if characteristics & pe::IMAGE_SCN_CNT_CODE != 0 {
                        't'
                    } else if name.starts_with(b".debug") {
                        'n'
                    } else if characteristics & pe::IMAGE_SCN_CNT_INITIALIZED_DATA != 0 {
                        if characteristics & pe::IMAGE_SCN_MEM_WRITE != 0 {
                            'd'
                        } else {
                            'r'
                        }
                    } else if characteristics & pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA != 0 {
                        'b'
                    } else if characteristics & pe::IMAGE_SCN_LNK_INFO != 0 {
                        'i'
                    } else {
                        's'
                    }
                }
                None => '?',
            }
        };
        if self.is_external() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

use crate::read::{
    self, Architecture, BinaryFormat, CompressedData, ObjectKind, RelocationTarget, Result,
    SectionIndex, SectionKind, SymbolFlags, SymbolIndex, SymbolSection, SymbolTableKind,
    SymbolType,
};

/// The attributes of a section that do not borrow from the file data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SectionInfo {
    pub address: u64,
    pub size: u64,
    /// The alignment in bytes.
    pub align: u64,
    /// The offset and size of the section data in the file, if it has any.
    pub file_range: Option<(u64, u64)>,
    pub kind: SectionKind,
    pub is_text: bool,
    pub is_data: bool,
    pub is_bss: bool,
}

/// The attributes of a symbol that do not borrow from the file data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SymbolInfo {
    pub address: u64,
    pub size: u64,
    pub file_offset: Option<u64>,
    pub section: SymbolSection,
    pub symbol_type: SymbolType,
    pub flags: SymbolFlags,
    /// The one letter classification printed by `nm`.
    pub nm_char: char,
}

/// A decoded relocation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RelocationInfo {
    /// The offset of the place of the relocation, relative to the section start.
    pub offset: u64,
    /// The address of the place of the relocation.
    pub address: u64,
    /// The raw relocation type.
    pub r_type: u32,
    /// The symbol table entry that the relocation references, if any.
    pub symbol: Option<(SymbolTableKind, SymbolIndex)>,
    pub target: RelocationTarget,
    pub addend: i64,
    pub implicit_addend: bool,
}

/// The operations that every file format backend provides.
///
/// Backends are created once when the file is parsed, and keep only offsets
/// and counts. Every query is given the file data again.
pub(crate) trait Backend: read::private::Sealed {
    fn format(&self) -> BinaryFormat;
    fn architecture(&self) -> Architecture;
    fn is_64(&self) -> bool;
    fn is_little_endian(&self) -> bool;
    fn kind(&self) -> ObjectKind;

    fn section_count(&self) -> usize;
    fn section_name<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]>;
    fn section_info(&self, data: &[u8], index: SectionIndex) -> Result<SectionInfo>;
    /// Return the raw section data. This is empty for sections without file data.
    fn section_data<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]>;
    fn section_compressed_data<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<CompressedData<'data>> {
        self.section_data(data, index).map(CompressedData::none)
    }

    fn relocation_count(&self, data: &[u8], section: SectionIndex) -> Result<usize>;
    fn relocation(&self, data: &[u8], section: SectionIndex, index: usize)
        -> Result<RelocationInfo>;
    fn relocation_type_name(&self, r_type: u32) -> Option<&'static str>;

    /// The number of raw entries in the symbol table.
    fn symbol_count(&self, table: SymbolTableKind) -> usize;
    /// The index of the first visible entry.
    fn first_symbol(&self, _table: SymbolTableKind) -> usize {
        0
    }
    /// The number of raw entries used by the symbol at `index`.
    fn symbol_stride(&self, _data: &[u8], _table: SymbolTableKind, _index: SymbolIndex) -> usize {
        1
    }
    fn symbol_name<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data [u8]>;
    fn symbol_info(
        &self,
        data: &[u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<SymbolInfo>;

    fn needed_library_count(&self) -> usize;
    fn needed_library<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]>;
}

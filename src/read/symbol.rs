use core::fmt;

use crate::read::{
    name_str, Backend, Error, FileRef, Result, SymbolFlags, SymbolIndex, SymbolInfo,
    SymbolSection, SymbolTableKind, SymbolType,
};

/// A cursor over the entries of a symbol table of an [`ObjectFile`](crate::ObjectFile).
///
/// Entries are visited in symbol table order. Entries that are not symbols,
/// such as the reserved null entry of ELF files and the auxiliary records of
/// COFF files, are skipped.
///
/// The cursor also implements [`Iterator`]. Each call to `next` yields a
/// [`Symbol`] view of the current symbol and advances the cursor.
pub struct SymbolIterator<'file> {
    file: FileRef<'file>,
    table: SymbolTableKind,
    index: usize,
    count: usize,
}

impl<'file> SymbolIterator<'file> {
    pub(crate) fn new(file: FileRef<'file>, table: SymbolTableKind) -> Self {
        let count = file.backend.symbol_count(table);
        let index = file.backend.first_symbol(table).min(count);
        SymbolIterator {
            file,
            table,
            index,
            count,
        }
    }

    /// Return a cursor positioned at the given entry, or at the end for `None`.
    pub(crate) fn at(file: FileRef<'file>, table: SymbolTableKind, index: Option<SymbolIndex>) -> Self {
        let count = file.backend.symbol_count(table);
        let index = match index {
            Some(index) if index.0 < count => index.0,
            _ => count,
        };
        SymbolIterator {
            file,
            table,
            index,
            count,
        }
    }

    /// Return the symbol table that this cursor traverses.
    #[inline]
    pub fn table(&self) -> SymbolTableKind {
        self.table
    }

    /// Return true if the cursor has been advanced past the last symbol.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.count
    }

    /// Advance to the next symbol.
    ///
    /// Returns an error if the cursor is already at the end. The cursor
    /// position is unchanged in that case.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Symbol cursor is at the end"));
        }
        self.step();
        Ok(())
    }

    fn step(&mut self) {
        let stride = self
            .file
            .backend
            .symbol_stride(self.file.data, self.table, SymbolIndex(self.index))
            .max(1);
        self.index = self.index.saturating_add(stride).min(self.count);
    }

    /// Return a view of the current symbol.
    pub fn current(&self) -> Result<Symbol<'file>> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Symbol cursor is at the end"));
        }
        Ok(Symbol {
            file: self.file,
            table: self.table,
            index: SymbolIndex(self.index),
        })
    }

    /// The name of the current symbol.
    pub fn name(&self) -> Result<&'file str> {
        self.current()?.name()
    }

    /// The address of the current symbol.
    pub fn address(&self) -> Result<u64> {
        self.current()?.address()
    }

    /// The offset of the current symbol in the file.
    ///
    /// This is `None` for symbols without file data, such as undefined,
    /// absolute and common symbols, or symbols in zero filled sections.
    pub fn file_offset(&self) -> Result<Option<u64>> {
        self.current()?.file_offset()
    }

    /// The size of the current symbol.
    pub fn size(&self) -> Result<u64> {
        self.current()?.size()
    }

    /// The type of the current symbol.
    pub fn symbol_type(&self) -> Result<SymbolType> {
        self.current()?.symbol_type()
    }

    /// The `nm` classification character of the current symbol.
    pub fn nm_type_char(&self) -> Result<char> {
        self.current()?.nm_type_char()
    }

    /// The flags of the current symbol.
    pub fn flags(&self) -> Result<SymbolFlags> {
        self.current()?.flags()
    }

    /// The section of the current symbol.
    pub fn section(&self) -> Result<SymbolSection> {
        self.current()?.section()
    }

    /// The index of the current symbol in its symbol table.
    pub fn index(&self) -> Result<SymbolIndex> {
        self.current().map(|symbol| symbol.index())
    }
}

impl<'file> Iterator for SymbolIterator<'file> {
    type Item = Symbol<'file>;

    fn next(&mut self) -> Option<Symbol<'file>> {
        let symbol = self.current().ok()?;
        self.step();
        Some(symbol)
    }
}

impl<'file> fmt::Debug for SymbolIterator<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolIterator")
            .field("table", &self.table)
            .field("index", &self.index)
            .field("count", &self.count)
            .finish()
    }
}

/// A symbol table entry of an [`ObjectFile`](crate::ObjectFile).
#[derive(Clone, Copy)]
pub struct Symbol<'file> {
    file: FileRef<'file>,
    table: SymbolTableKind,
    index: SymbolIndex,
}

impl<'file> Symbol<'file> {
    #[inline]
    pub(crate) fn file(&self) -> FileRef<'file> {
        self.file
    }

    #[inline]
    pub(crate) fn info(&self) -> Result<SymbolInfo> {
        self.file
            .backend
            .symbol_info(self.file.data, self.table, self.index)
    }

    /// The index of the symbol in its symbol table.
    #[inline]
    pub fn index(&self) -> SymbolIndex {
        self.index
    }

    /// The symbol table that contains the symbol.
    #[inline]
    pub fn table(&self) -> SymbolTableKind {
        self.table
    }

    /// The raw name of the symbol.
    pub fn name_bytes(&self) -> Result<&'file [u8]> {
        self.file
            .backend
            .symbol_name(self.file.data, self.table, self.index)
    }

    /// The name of the symbol.
    ///
    /// Returns an error if the name is not UTF-8.
    pub fn name(&self) -> Result<&'file str> {
        name_str(self.name_bytes()?, "Non UTF-8 symbol name")
    }

    /// The address of the symbol. May be zero if the address is unknown.
    pub fn address(&self) -> Result<u64> {
        self.info().map(|info| info.address)
    }

    /// The offset of the symbol in the file, if it has file data.
    pub fn file_offset(&self) -> Result<Option<u64>> {
        self.info().map(|info| info.file_offset)
    }

    /// The size of the symbol. May be zero if the size is unknown.
    pub fn size(&self) -> Result<u64> {
        self.info().map(|info| info.size)
    }

    /// The type of the symbol.
    pub fn symbol_type(&self) -> Result<SymbolType> {
        self.info().map(|info| info.symbol_type)
    }

    /// The `nm` classification character of the symbol.
    pub fn nm_type_char(&self) -> Result<char> {
        self.info().map(|info| info.nm_char)
    }

    /// The flags of the symbol.
    pub fn flags(&self) -> Result<SymbolFlags> {
        self.info().map(|info| info.flags)
    }

    /// The section that the symbol is defined in.
    pub fn section(&self) -> Result<SymbolSection> {
        self.info().map(|info| info.section)
    }

    /// Return true if the symbol is undefined.
    pub fn is_undefined(&self) -> Result<bool> {
        self.info()
            .map(|info| info.flags.contains(SymbolFlags::UNDEFINED))
    }

    /// Return true if the symbol is visible outside of the file.
    pub fn is_global(&self) -> Result<bool> {
        self.info()
            .map(|info| info.flags.contains(SymbolFlags::GLOBAL))
    }
}

impl<'file> fmt::Debug for Symbol<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Symbol");
        s.field("table", &self.table).field("index", &self.index);
        if let Ok(name) = self.name() {
            s.field("name", &name);
        }
        if let Ok(info) = self.info() {
            s.field("address", &info.address)
                .field("size", &info.size)
                .field("type", &info.symbol_type)
                .field("section", &info.section)
                .field("flags", &info.flags);
        }
        s.finish()
    }
}

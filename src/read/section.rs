use alloc::borrow::Cow;
use core::fmt;

use crate::read::{
    name_str, Backend, CompressedData, CompressionFormat, Error, FileRef, RelocationIterator,
    Result, SectionIndex, SectionInfo, SectionKind, Symbol, SymbolIterator, SymbolSection,
};

/// A cursor over the sections of an [`ObjectFile`](crate::ObjectFile).
///
/// The cursor starts at the first section, and is at the end once it has been
/// advanced past the last section. Queries on a cursor at the end return an
/// error of kind [`ErrorKind::InvalidState`](crate::ErrorKind).
///
/// The cursor also implements [`Iterator`]. Each call to `next` yields a
/// [`Section`] view of the current section and advances the cursor.
pub struct SectionIterator<'file> {
    file: FileRef<'file>,
    index: usize,
    count: usize,
}

impl<'file> SectionIterator<'file> {
    pub(crate) fn new(file: FileRef<'file>) -> Self {
        SectionIterator {
            file,
            index: 0,
            count: file.backend.section_count(),
        }
    }

    /// Return true if the cursor has been advanced past the last section.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.count
    }

    /// Advance to the next section.
    ///
    /// Returns an error if the cursor is already at the end. The cursor
    /// position is unchanged in that case.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Section cursor is at the end"));
        }
        self.index += 1;
        Ok(())
    }

    /// Return a view of the current section.
    pub fn current(&self) -> Result<Section<'file>> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Section cursor is at the end"));
        }
        Ok(Section {
            file: self.file,
            index: SectionIndex(self.index),
        })
    }

    /// Move this cursor to the section that contains the current symbol of `symbol`.
    ///
    /// Returns an error of kind [`ErrorKind::NotFound`](crate::ErrorKind) if
    /// the symbol is not in any section, such as for undefined or common
    /// symbols. The cursor is positioned at the end in that case.
    pub fn move_to_containing_section(&mut self, symbol: &SymbolIterator<'file>) -> Result<()> {
        let symbol = symbol.current()?;
        match containing_section(self.file, &symbol)? {
            Some(index) => {
                self.index = index.0;
                Ok(())
            }
            None => {
                self.index = self.count;
                Err(Error::not_found("Symbol is not contained in any section"))
            }
        }
    }

    /// The name of the current section.
    pub fn name(&self) -> Result<&'file str> {
        self.current()?.name()
    }

    /// The size in bytes of the current section.
    pub fn size(&self) -> Result<u64> {
        self.current()?.size()
    }

    /// The raw contents of the current section.
    pub fn contents(&self) -> Result<&'file [u8]> {
        self.current()?.contents()
    }

    /// The address of the current section.
    pub fn address(&self) -> Result<u64> {
        self.current()?.address()
    }

    /// The alignment in bytes of the current section.
    pub fn alignment(&self) -> Result<u64> {
        self.current()?.alignment()
    }

    /// Return true if the current section contains the current symbol of `symbol`.
    pub fn contains_symbol(&self, symbol: &SymbolIterator<'file>) -> Result<bool> {
        self.current()?.contains_symbol(&symbol.current()?)
    }

    /// Return true if the current section contains executable code.
    pub fn is_text(&self) -> Result<bool> {
        self.current()?.is_text()
    }

    /// Return true if the current section contains initialized writable data.
    pub fn is_data(&self) -> Result<bool> {
        self.current()?.is_data()
    }

    /// Return true if the current section is zero filled.
    pub fn is_bss(&self) -> Result<bool> {
        self.current()?.is_bss()
    }

    /// Return a cursor over the relocations that apply to the current section.
    pub fn relocations(&self) -> Result<RelocationIterator<'file>> {
        self.current()?.relocations()
    }
}

impl<'file> Iterator for SectionIterator<'file> {
    type Item = Section<'file>;

    fn next(&mut self) -> Option<Section<'file>> {
        let section = self.current().ok()?;
        self.index += 1;
        Some(section)
    }
}

impl<'file> fmt::Debug for SectionIterator<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionIterator")
            .field("index", &self.index)
            .field("count", &self.count)
            .finish()
    }
}

/// A section of an [`ObjectFile`](crate::ObjectFile).
#[derive(Clone, Copy)]
pub struct Section<'file> {
    file: FileRef<'file>,
    index: SectionIndex,
}

impl<'file> Section<'file> {
    #[inline]
    fn info(&self) -> Result<SectionInfo> {
        self.file.backend.section_info(self.file.data, self.index)
    }

    /// Returns the section index.
    #[inline]
    pub fn index(&self) -> SectionIndex {
        self.index
    }

    /// Returns the raw name of the section.
    pub fn name_bytes(&self) -> Result<&'file [u8]> {
        self.file.backend.section_name(self.file.data, self.index)
    }

    /// Returns the name of the section.
    ///
    /// Returns an error if the name is not UTF-8.
    pub fn name(&self) -> Result<&'file str> {
        name_str(self.name_bytes()?, "Non UTF-8 section name")
    }

    /// Returns the address of the section.
    pub fn address(&self) -> Result<u64> {
        self.info().map(|info| info.address)
    }

    /// Returns the size of the section in memory.
    pub fn size(&self) -> Result<u64> {
        self.info().map(|info| info.size)
    }

    /// Returns the alignment of the section in memory.
    pub fn alignment(&self) -> Result<u64> {
        self.info().map(|info| info.align)
    }

    /// Returns the offset and size of the section in the file.
    ///
    /// Returns `None` if the section has no file data.
    pub fn file_range(&self) -> Result<Option<(u64, u64)>> {
        self.info().map(|info| info.file_range)
    }

    /// Returns the raw contents of the section.
    ///
    /// The contents are empty for zero filled sections. Compressed sections
    /// are returned as stored in the file.
    pub fn contents(&self) -> Result<&'file [u8]> {
        self.file.backend.section_data(self.file.data, self.index)
    }

    /// Returns the kind of the section.
    pub fn kind(&self) -> Result<SectionKind> {
        self.info().map(|info| info.kind)
    }

    /// Return true if the section contains executable code.
    pub fn is_text(&self) -> Result<bool> {
        self.info().map(|info| info.is_text)
    }

    /// Return true if the section contains initialized writable data.
    pub fn is_data(&self) -> Result<bool> {
        self.info().map(|info| info.is_data)
    }

    /// Return true if the section is zero filled.
    pub fn is_bss(&self) -> Result<bool> {
        self.info().map(|info| info.is_bss)
    }

    /// Returns the potentially compressed contents of the section,
    /// along with information about the compression.
    pub fn compressed_data(&self) -> Result<CompressedData<'file>> {
        self.file
            .backend
            .section_compressed_data(self.file.data, self.index)
    }

    /// Return true if the section contents are compressed.
    pub fn is_compressed(&self) -> Result<bool> {
        self.compressed_data()
            .map(|data| data.format != CompressionFormat::None)
    }

    /// Returns the uncompressed contents of the section.
    ///
    /// Returns an error if the contents are compressed and the `compression`
    /// feature is disabled.
    pub fn uncompressed_contents(&self) -> Result<Cow<'file, [u8]>> {
        self.compressed_data()?.decompress()
    }

    /// Return true if this section contains the given symbol.
    ///
    /// This agrees with [`SectionIterator::move_to_containing_section`].
    pub fn contains_symbol(&self, symbol: &Symbol<'file>) -> Result<bool> {
        Ok(containing_section(self.file, symbol)? == Some(self.index))
    }

    /// Return a cursor over the relocations that apply to this section.
    pub fn relocations(&self) -> Result<RelocationIterator<'file>> {
        RelocationIterator::new(self.file, self.index)
    }
}

impl<'file> fmt::Debug for Section<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Section");
        s.field("index", &self.index);
        match self.name() {
            Ok(name) => s.field("name", &name),
            Err(_) => s.field("name", &"<invalid>"),
        };
        if let Ok(info) = self.info() {
            s.field("address", &info.address)
                .field("size", &info.size)
                .field("kind", &info.kind);
        }
        s.finish()
    }
}

/// Find the section that contains a symbol.
///
/// Symbols that record a section index use it directly. Absolute symbols and
/// symbols with an unknown section are matched by address against the first
/// section whose non-empty address range contains them.
fn containing_section(file: FileRef<'_>, symbol: &Symbol<'_>) -> Result<Option<SectionIndex>> {
    if !file.same_file(symbol.file()) {
        return Err(Error::invalid_state("Symbol belongs to a different file"));
    }
    let info = symbol.info()?;
    let count = file.backend.section_count();
    match info.section {
        SymbolSection::Section(index) => Ok(if index.0 < count { Some(index) } else { None }),
        SymbolSection::Absolute | SymbolSection::Unknown => {
            for index in 0..count {
                let section = match file.backend.section_info(file.data, SectionIndex(index)) {
                    Ok(section) => section,
                    Err(_) => continue,
                };
                if section.size != 0
                    && info.address >= section.address
                    && info.address - section.address < section.size
                {
                    return Ok(Some(SectionIndex(index)));
                }
            }
            Ok(None)
        }
        SymbolSection::None | SymbolSection::Undefined | SymbolSection::Common => Ok(None),
    }
}

use core::fmt;
use core::ptr;

#[cfg(feature = "coff")]
use crate::read::coff;
#[cfg(feature = "elf")]
use crate::read::elf;
#[cfg(feature = "macho")]
use crate::read::macho;
use crate::read::{
    Architecture, Backend, BinaryFormat, CompressedData, Error, NeededLibraryIterator, ObjectKind,
    RelocationInfo, Result, SectionIndex, SectionInfo, SectionIterator, SymbolIndex, SymbolInfo,
    SymbolIterator, SymbolTableKind,
};

/// Evaluate an expression on the contents of a file format enum.
///
/// This is a hack to avoid virtual calls.
macro_rules! with_inner {
    ($inner:expr, $enum:ident, | $var:ident | $body:expr) => {
        match $inner {
            #[cfg(feature = "coff")]
            $enum::Coff(ref $var) => $body,
            #[cfg(feature = "elf")]
            $enum::Elf32(ref $var) => $body,
            #[cfg(feature = "elf")]
            $enum::Elf64(ref $var) => $body,
            #[cfg(feature = "macho")]
            $enum::MachO32(ref $var) => $body,
            #[cfg(feature = "macho")]
            $enum::MachO64(ref $var) => $body,
        }
    };
}

/// A file format kind, determined from the leading bytes of the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Coff,
    Elf32,
    Elf64,
    MachO32,
    MachO64,
    Pe,
}

impl FileKind {
    fn parse(data: &[u8]) -> Result<FileKind> {
        let magic = match data.get(..16) {
            Some(magic) => magic,
            None => return Err(Error::unsupported_format("File too short")),
        };

        let kind = match magic {
            [0x7f, b'E', b'L', b'F', 1, ..] => FileKind::Elf32,
            [0x7f, b'E', b'L', b'F', 2, ..] => FileKind::Elf64,
            [0xfe, 0xed, 0xfa, 0xce, ..] | [0xce, 0xfa, 0xed, 0xfe, ..] => FileKind::MachO32,
            [0xfe, 0xed, 0xfa, 0xcf, ..] | [0xcf, 0xfa, 0xed, 0xfe, ..] => FileKind::MachO64,
            [b'M', b'Z', ..] => FileKind::Pe,
            // Machine types of COFF relocatable objects.
            [0x4c, 0x01, ..] // IMAGE_FILE_MACHINE_I386
            | [0x64, 0x86, ..] // IMAGE_FILE_MACHINE_AMD64
            | [0x64, 0xaa, ..] // IMAGE_FILE_MACHINE_ARM64
            | [0xc0, 0x01, ..] // IMAGE_FILE_MACHINE_ARM
            | [0xc2, 0x01, ..] // IMAGE_FILE_MACHINE_THUMB
            | [0xc4, 0x01, ..] // IMAGE_FILE_MACHINE_ARMNT
            => FileKind::Coff,
            _ => return Err(Error::unsupported_format("Unknown file magic")),
        };

        if data.len() < kind.header_size() {
            return Err(Error::unsupported_format("File too short for header"));
        }
        Ok(kind)
    }

    /// The size of the fixed header that must be present for the format.
    fn header_size(self) -> usize {
        match self {
            FileKind::Coff => 20,
            FileKind::Elf32 => 52,
            FileKind::Elf64 => 64,
            FileKind::MachO32 => 28,
            FileKind::MachO64 => 32,
            FileKind::Pe => 64,
        }
    }
}

/// The backend for a parsed file.
#[allow(clippy::large_enum_variant)]
#[derive(Debug)]
pub(crate) enum FileBackend {
    #[cfg(feature = "coff")]
    Coff(coff::CoffBackend),
    #[cfg(feature = "elf")]
    Elf32(elf::ElfBackend32),
    #[cfg(feature = "elf")]
    Elf64(elf::ElfBackend64),
    #[cfg(feature = "macho")]
    MachO32(macho::MachOBackend32),
    #[cfg(feature = "macho")]
    MachO64(macho::MachOBackend64),
}

impl FileBackend {
    fn parse(data: &[u8]) -> Result<FileBackend> {
        let kind = FileKind::parse(data)?;
        let backend = match kind {
            #[cfg(feature = "coff")]
            FileKind::Coff => FileBackend::Coff(coff::CoffBackend::parse(data)?),
            #[cfg(feature = "coff")]
            FileKind::Pe => FileBackend::Coff(coff::CoffBackend::parse_pe(data)?),
            #[cfg(feature = "elf")]
            FileKind::Elf32 => FileBackend::Elf32(elf::ElfBackend::parse(data)?),
            #[cfg(feature = "elf")]
            FileKind::Elf64 => FileBackend::Elf64(elf::ElfBackend::parse(data)?),
            #[cfg(feature = "macho")]
            FileKind::MachO32 => FileBackend::MachO32(macho::MachOBackend::parse(data)?),
            #[cfg(feature = "macho")]
            FileKind::MachO64 => FileBackend::MachO64(macho::MachOBackend::parse(data)?),
            #[allow(unreachable_patterns)]
            _ => return Err(Error::unsupported_format("File format support is disabled")),
        };
        #[cfg(feature = "logging")]
        debug!(
            "Selected {:?} backend for {} bytes of {:?}",
            kind,
            data.len(),
            backend.architecture()
        );
        Ok(backend)
    }
}

impl crate::read::private::Sealed for FileBackend {}

impl Backend for FileBackend {
    fn format(&self) -> BinaryFormat {
        with_inner!(*self, FileBackend, |x| x.format())
    }

    fn architecture(&self) -> Architecture {
        with_inner!(*self, FileBackend, |x| x.architecture())
    }

    fn is_64(&self) -> bool {
        with_inner!(*self, FileBackend, |x| x.is_64())
    }

    fn is_little_endian(&self) -> bool {
        with_inner!(*self, FileBackend, |x| x.is_little_endian())
    }

    fn kind(&self) -> ObjectKind {
        with_inner!(*self, FileBackend, |x| x.kind())
    }

    fn section_count(&self) -> usize {
        with_inner!(*self, FileBackend, |x| x.section_count())
    }

    fn section_name<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        with_inner!(*self, FileBackend, |x| x.section_name(data, index))
    }

    fn section_info(&self, data: &[u8], index: SectionIndex) -> Result<SectionInfo> {
        with_inner!(*self, FileBackend, |x| x.section_info(data, index))
    }

    fn section_data<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        with_inner!(*self, FileBackend, |x| x.section_data(data, index))
    }

    fn section_compressed_data<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<CompressedData<'data>> {
        with_inner!(*self, FileBackend, |x| x.section_compressed_data(data, index))
    }

    fn relocation_count(&self, data: &[u8], section: SectionIndex) -> Result<usize> {
        with_inner!(*self, FileBackend, |x| x.relocation_count(data, section))
    }

    fn relocation(
        &self,
        data: &[u8],
        section: SectionIndex,
        index: usize,
    ) -> Result<RelocationInfo> {
        with_inner!(*self, FileBackend, |x| x.relocation(data, section, index))
    }

    fn relocation_type_name(&self, r_type: u32) -> Option<&'static str> {
        with_inner!(*self, FileBackend, |x| x.relocation_type_name(r_type))
    }

    fn symbol_count(&self, table: SymbolTableKind) -> usize {
        with_inner!(*self, FileBackend, |x| x.symbol_count(table))
    }

    fn first_symbol(&self, table: SymbolTableKind) -> usize {
        with_inner!(*self, FileBackend, |x| x.first_symbol(table))
    }

    fn symbol_stride(&self, data: &[u8], table: SymbolTableKind, index: SymbolIndex) -> usize {
        with_inner!(*self, FileBackend, |x| x.symbol_stride(data, table, index))
    }

    fn symbol_name<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data [u8]> {
        with_inner!(*self, FileBackend, |x| x.symbol_name(data, table, index))
    }

    fn symbol_info(
        &self,
        data: &[u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<SymbolInfo> {
        with_inner!(*self, FileBackend, |x| x.symbol_info(data, table, index))
    }

    fn needed_library_count(&self) -> usize {
        with_inner!(*self, FileBackend, |x| x.needed_library_count())
    }

    fn needed_library<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        with_inner!(*self, FileBackend, |x| x.needed_library(data, index))
    }
}

/// A borrowed view of an [`ObjectFile`], shared by all of its cursors.
#[derive(Clone, Copy)]
pub(crate) struct FileRef<'file> {
    pub data: &'file [u8],
    pub backend: &'file FileBackend,
}

impl<'file> FileRef<'file> {
    /// Return true if both views refer to the same parsed file.
    #[inline]
    pub fn same_file(self, other: FileRef<'_>) -> bool {
        ptr::eq(self.backend, other.backend)
    }
}

/// An object file.
///
/// The file owns its data buffer, which may be anything that dereferences to
/// bytes, such as a `Vec<u8>`, a `&[u8]` or a memory map. The format is
/// detected once by [`ObjectFile::create`], and the cursors returned by
/// [`ObjectFile::sections`], [`ObjectFile::symbols`],
/// [`ObjectFile::dynamic_symbols`] and [`ObjectFile::needed_libraries`]
/// borrow the file for their lifetime.
///
/// Cursors only read the file, so any number of them may be used at once,
/// including from multiple threads.
pub struct ObjectFile<B: AsRef<[u8]>> {
    buffer: B,
    backend: FileBackend,
}

impl<B: AsRef<[u8]>> ObjectFile<B> {
    /// Detect the file format and parse the headers.
    ///
    /// Returns an error of kind [`ErrorKind::UnsupportedFormat`](crate::ErrorKind)
    /// if the data is not a supported object file, and
    /// [`ErrorKind::Malformed`](crate::ErrorKind) if its headers are invalid.
    pub fn create(buffer: B) -> Result<Self> {
        let backend = FileBackend::parse(buffer.as_ref())?;
        Ok(ObjectFile { buffer, backend })
    }

    /// Return the data buffer, consuming the file.
    #[inline]
    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Return the file data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    #[inline]
    fn file_ref(&self) -> FileRef<'_> {
        FileRef {
            data: self.buffer.as_ref(),
            backend: &self.backend,
        }
    }

    /// Return the file format.
    #[inline]
    pub fn format(&self) -> BinaryFormat {
        self.backend.format()
    }

    /// Return the architecture that the file is for.
    #[inline]
    pub fn architecture(&self) -> Architecture {
        self.backend.architecture()
    }

    /// Return true if the file uses 64-bit addresses.
    #[inline]
    pub fn is_64(&self) -> bool {
        self.backend.is_64()
    }

    /// Return true if the file is little endian.
    #[inline]
    pub fn is_little_endian(&self) -> bool {
        self.backend.is_little_endian()
    }

    /// Return the kind of this file.
    #[inline]
    pub fn kind(&self) -> ObjectKind {
        self.backend.kind()
    }

    /// Return a cursor positioned at the first section.
    pub fn sections(&self) -> SectionIterator<'_> {
        SectionIterator::new(self.file_ref())
    }

    /// Return a cursor positioned at the first entry of the static symbol table.
    ///
    /// The cursor is at the end immediately if there is no symbol table.
    pub fn symbols(&self) -> SymbolIterator<'_> {
        SymbolIterator::new(self.file_ref(), SymbolTableKind::Static)
    }

    /// Return a cursor positioned at the first entry of the dynamic symbol table.
    ///
    /// The cursor is at the end immediately if there is no dynamic symbol table.
    pub fn dynamic_symbols(&self) -> SymbolIterator<'_> {
        SymbolIterator::new(self.file_ref(), SymbolTableKind::Dynamic)
    }

    /// Return a cursor over the shared libraries that this file depends on.
    pub fn needed_libraries(&self) -> NeededLibraryIterator<'_> {
        NeededLibraryIterator::new(self.file_ref())
    }
}

impl<B: AsRef<[u8]>> fmt::Debug for ObjectFile<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectFile")
            .field("format", &self.format())
            .field("architecture", &self.architecture())
            .field("kind", &self.kind())
            .field("size", &self.data().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read::ErrorKind;

    #[test]
    fn file_kind() {
        let mut data = [0u8; 64];
        data[..5].copy_from_slice(b"\x7fELF\x02");
        assert_eq!(FileKind::parse(&data), Ok(FileKind::Elf64));
        data[4] = 1;
        assert_eq!(FileKind::parse(&data), Ok(FileKind::Elf32));
        assert_eq!(
            FileKind::parse(&data[..40]).map_err(|e| e.kind()),
            Err(ErrorKind::UnsupportedFormat)
        );

        data[..4].copy_from_slice(&[0xcf, 0xfa, 0xed, 0xfe]);
        assert_eq!(FileKind::parse(&data), Ok(FileKind::MachO64));
        data[..4].copy_from_slice(&[0xfe, 0xed, 0xfa, 0xce]);
        assert_eq!(FileKind::parse(&data), Ok(FileKind::MachO32));

        data[..2].copy_from_slice(b"MZ");
        assert_eq!(FileKind::parse(&data), Ok(FileKind::Pe));
        data[..2].copy_from_slice(&[0x64, 0x86]);
        assert_eq!(FileKind::parse(&data), Ok(FileKind::Coff));
    }

    #[test]
    fn file_kind_unknown() {
        for data in [&[][..], &[0x7f, b'E', b'L', b'F'][..], &[0xff; 64][..]] {
            assert_eq!(
                FileKind::parse(data).map_err(|e| e.kind()),
                Err(ErrorKind::UnsupportedFormat)
            );
        }
    }
}

//! Interface for inspecting object files.
//!
//! ## Unified read API
//!
//! [`ObjectFile`] owns the file data and the backend selected for its format.
//! It hands out forward-only cursors that borrow the file:
//!
//! - [`SectionIterator`] over the sections,
//! - [`SymbolIterator`] over the static or dynamic symbol table,
//! - [`RelocationIterator`] over the relocations of one section,
//! - [`NeededLibraryIterator`] over the shared libraries the file depends on.
//!
//! Each cursor answers queries about the entity at its current position, and
//! each also implements [`Iterator`], yielding lightweight views such as
//! [`Section`] and [`Symbol`].
//!
//! ## Backends
//!
//! Each supported format has a backend that records the locations of the
//! headers and tables when the file is created, and decodes entries on demand
//! from the raw structs in `crate::elf`, `crate::macho` and `crate::pe`.

use alloc::borrow::Cow;
use core::{fmt, ops, result};

// Implement trait accessors that read an endian field of the same name.
macro_rules! field_getters {
    ($($field:ident: $ty:ty),+ $(,)?) => {
        $(
            #[inline]
            fn $field(&self, endian: Self::Endian) -> $ty {
                self.$field.get(endian)
            }
        )+
    };
}

mod util;
pub(crate) use util::*;

mod backend;
pub(crate) use backend::*;

mod any;
pub use any::*;

mod section;
pub use section::*;

mod symbol;
pub use symbol::*;

#[macro_use]
mod relocation;
pub use relocation::*;
pub(crate) use relocation::relocation_name;

mod library;
pub use library::*;

#[cfg(feature = "coff")]
mod coff;

#[cfg(feature = "elf")]
mod elf;

#[cfg(feature = "macho")]
mod macho;

mod private {
    pub trait Sealed {}
}

/// The kind of error returned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The data does not start with the magic of any supported format,
    /// or is too short to hold its headers.
    UnsupportedFormat,
    /// A cursor was used in a state that does not allow the operation,
    /// such as querying or advancing a cursor that is at the end.
    InvalidState,
    /// A search did not find a matching entity.
    NotFound,
    /// The file contains invalid offsets, sizes, indices or strings.
    Malformed,
    /// The file uses a feature that is not supported, such as an unknown
    /// compression format.
    Unsupported,
}

/// The error type used within the read module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    message: &'static str,
}

impl Error {
    #[inline]
    pub(crate) const fn new(kind: ErrorKind, message: &'static str) -> Self {
        Error { kind, message }
    }

    #[inline]
    pub(crate) const fn unsupported_format(message: &'static str) -> Self {
        Error::new(ErrorKind::UnsupportedFormat, message)
    }

    #[inline]
    pub(crate) const fn invalid_state(message: &'static str) -> Self {
        Error::new(ErrorKind::InvalidState, message)
    }

    #[inline]
    pub(crate) const fn not_found(message: &'static str) -> Self {
        Error::new(ErrorKind::NotFound, message)
    }

    #[inline]
    pub(crate) const fn malformed(message: &'static str) -> Self {
        Error::new(ErrorKind::Malformed, message)
    }

    #[inline]
    pub(crate) const fn unsupported(message: &'static str) -> Self {
        Error::new(ErrorKind::Unsupported, message)
    }

    /// Get the kind of error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Get the error message.
    #[inline]
    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// The result type used within the read module.
pub type Result<T> = result::Result<T, Error>;

/// Convert a missing value or a unit error into a `Malformed` error.
pub(crate) trait ReadError<T> {
    fn read_error(self, error: &'static str) -> Result<T>;
}

impl<T> ReadError<T> for result::Result<T, ()> {
    fn read_error(self, error: &'static str) -> Result<T> {
        self.map_err(|()| Error::malformed(error))
    }
}

impl<T> ReadError<T> for result::Result<T, Error> {
    fn read_error(self, error: &'static str) -> Result<T> {
        self.map_err(|_| Error::malformed(error))
    }
}

impl<T> ReadError<T> for Option<T> {
    fn read_error(self, error: &'static str) -> Result<T> {
        self.ok_or(Error::malformed(error))
    }
}

/// A file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum BinaryFormat {
    /// A COFF relocatable object.
    Coff,
    /// An ELF file.
    Elf,
    /// A Mach-O file.
    MachO,
    /// A PE image.
    Pe,
}

/// A CPU architecture.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Architecture {
    Unknown,
    Aarch64,
    Arm,
    I386,
    Mips,
    PowerPc,
    PowerPc64,
    Riscv32,
    Riscv64,
    X86_64,
}

/// An object kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ObjectKind {
    /// The object kind is unknown.
    Unknown,
    /// Relocatable object.
    Relocatable,
    /// Executable.
    Executable,
    /// Dynamic shared object.
    Dynamic,
    /// Core.
    Core,
}

/// The index used to identify a section in a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionIndex(pub usize);

impl fmt::Display for SectionIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The index used to identify a symbol in a symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolIndex(pub usize);

impl fmt::Display for SymbolIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The symbol table that a symbol belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolTableKind {
    /// The symbol table used by the static linker.
    ///
    /// ELF `.symtab`, the Mach-O `LC_SYMTAB` table, or the COFF symbol table.
    Static,
    /// The symbol table used by the dynamic linker.
    ///
    /// ELF `.dynsym`. Empty for other formats.
    Dynamic,
}

/// The kind of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SectionKind {
    /// The section kind is unknown.
    Unknown,
    /// An executable code section.
    ///
    /// Example ELF sections: `.text`
    ///
    /// Example Mach-O sections: `__TEXT/__text`
    Text,
    /// A data section.
    ///
    /// Example ELF sections: `.data`
    ///
    /// Example Mach-O sections: `__DATA/__data`
    Data,
    /// A read only data section.
    ///
    /// Example ELF sections: `.rodata`
    ///
    /// Example Mach-O sections: `__TEXT/__const`, `__DATA/__const`, `__TEXT/__literal4`
    ReadOnlyData,
    /// A loadable string section.
    ///
    /// Example ELF sections: `.rodata.str`
    ///
    /// Example Mach-O sections: `__TEXT/__cstring`
    ReadOnlyString,
    /// An uninitialized data section.
    ///
    /// Example ELF sections: `.bss`
    ///
    /// Example Mach-O sections: `__DATA/__bss`, `__DATA/__common`
    UninitializedData,
    /// A TLS data section.
    ///
    /// Example ELF sections: `.tdata`
    ///
    /// Example Mach-O sections: `__DATA/__thread_data`
    Tls,
    /// An uninitialized TLS data section.
    ///
    /// Example ELF sections: `.tbss`
    ///
    /// Example Mach-O sections: `__DATA/__thread_bss`
    UninitializedTls,
    /// A non-loadable string section.
    ///
    /// Example ELF sections: `.comment`, `.debug_str`
    OtherString,
    /// Some other non-loadable section.
    ///
    /// Example ELF sections: `.debug_info`
    Other,
    /// Debug information.
    ///
    /// Example Mach-O sections: `__DWARF/__debug_info`
    Debug,
    /// Information for the linker.
    ///
    /// Example COFF sections: `.drectve`
    Linker,
    /// ELF note section.
    Note,
    /// Metadata such as symbols or relocations.
    ///
    /// Example ELF sections: `.symtab`, `.strtab`, `.group`
    Metadata,
}

impl SectionKind {
    /// Return true if this section contains zerofill data.
    pub fn is_bss(self) -> bool {
        self == SectionKind::UninitializedData || self == SectionKind::UninitializedTls
    }
}

/// The coarse classification of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// The symbol type is unknown, or the symbol is undefined.
    Unknown,
    /// The symbol is for a data object.
    Data,
    /// The symbol is for debugging information, or names a section.
    Debug,
    /// The symbol is the name of a file.
    File,
    /// The symbol is for executable code.
    Function,
    /// The symbol is something else.
    Other,
}

/// A set of symbol flags.
///
/// The bit values are stable and may be combined with `|`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolFlags(pub u32);

impl SymbolFlags {
    /// No flags are set.
    pub const NONE: SymbolFlags = SymbolFlags(0);
    /// The symbol is referenced but not defined in this file.
    pub const UNDEFINED: SymbolFlags = SymbolFlags(0x1);
    /// The symbol is visible outside of this file.
    pub const GLOBAL: SymbolFlags = SymbolFlags(0x2);
    /// The symbol may be overridden by another definition.
    pub const WEAK: SymbolFlags = SymbolFlags(0x4);
    /// The symbol value is an absolute value that is not relocated.
    pub const ABSOLUTE: SymbolFlags = SymbolFlags(0x8);
    /// The symbol is a thread-local variable.
    pub const THREAD_LOCAL: SymbolFlags = SymbolFlags(0x10);
    /// The symbol is a common block that is merged by the linker.
    pub const COMMON: SymbolFlags = SymbolFlags(0x20);
    /// The symbol exists for format bookkeeping, such as a file name,
    /// a section definition or a debugging stab.
    pub const FORMAT_SPECIFIC: SymbolFlags = SymbolFlags(0x8000_0000);

    /// Return the raw bits.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Return true if no flags are set.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Return true if all of the flags in `other` are set.
    #[inline]
    pub fn contains(self, other: SymbolFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl ops::BitOr for SymbolFlags {
    type Output = SymbolFlags;

    #[inline]
    fn bitor(self, rhs: SymbolFlags) -> SymbolFlags {
        SymbolFlags(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for SymbolFlags {
    #[inline]
    fn bitor_assign(&mut self, rhs: SymbolFlags) {
        self.0 |= rhs.0;
    }
}

/// The section where a symbol is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolSection {
    /// The section is unknown.
    Unknown,
    /// The section is not applicable for this symbol (such as file symbols).
    None,
    /// The symbol is undefined.
    Undefined,
    /// The symbol has an absolute value.
    Absolute,
    /// The symbol is a zero-initialized symbol that will be combined with duplicate definitions.
    Common,
    /// The symbol is defined in the given section.
    Section(SectionIndex),
}

impl SymbolSection {
    /// Returns the section index for the section where the symbol is defined.
    ///
    /// May return `None` if the symbol is not defined in a section.
    #[inline]
    pub fn index(self) -> Option<SectionIndex> {
        if let SymbolSection::Section(index) = self {
            Some(index)
        } else {
            None
        }
    }
}

/// A data compression format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CompressionFormat {
    /// The data is uncompressed.
    None,
    /// The data is compressed, but the compression format is unknown.
    Unknown,
    /// ZLIB/DEFLATE.
    ///
    /// Used for ELF compression and GNU compressed debug information.
    Zlib,
    /// Zstandard.
    ///
    /// Used for ELF compression.
    Zstandard,
}

/// Data that may be compressed.
///
/// Returned by [`Section::compressed_data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressedData<'data> {
    /// The data compression format.
    pub format: CompressionFormat,
    /// The compressed data.
    pub data: &'data [u8],
    /// The uncompressed data size.
    pub uncompressed_size: u64,
}

impl<'data> CompressedData<'data> {
    /// Data that is uncompressed.
    #[inline]
    pub fn none(data: &'data [u8]) -> Self {
        CompressedData {
            format: CompressionFormat::None,
            data,
            uncompressed_size: data.len() as u64,
        }
    }

    /// Return the uncompressed data.
    ///
    /// Returns an error for invalid data or unsupported compression.
    /// This includes if the data is compressed but the `compression` feature
    /// for this crate is disabled.
    pub fn decompress(self) -> Result<Cow<'data, [u8]>> {
        match self.format {
            CompressionFormat::None => Ok(Cow::Borrowed(self.data)),
            #[cfg(feature = "compression")]
            CompressionFormat::Zlib | CompressionFormat::Zstandard => {
                use core::convert::TryInto;
                use std::io::Read;
                let size = self
                    .uncompressed_size
                    .try_into()
                    .ok()
                    .read_error("Uncompressed data size is too large.")?;
                let mut decompressed = alloc::vec::Vec::new();
                decompressed
                    .try_reserve_exact(size)
                    .ok()
                    .read_error("Uncompressed data allocation failed")?;

                if self.format == CompressionFormat::Zlib {
                    let mut decompress = flate2::Decompress::new(true);
                    decompress
                        .decompress_vec(
                            self.data,
                            &mut decompressed,
                            flate2::FlushDecompress::Finish,
                        )
                        .ok()
                        .read_error("Invalid zlib compressed data")?;
                } else {
                    let mut decoder = ruzstd::decoding::StreamingDecoder::new(self.data)
                        .ok()
                        .read_error("Invalid zstd compressed data")?;
                    decoder
                        .read_to_end(&mut decompressed)
                        .ok()
                        .read_error("Invalid zstd compressed data")?;
                }
                if size != decompressed.len() {
                    return Err(Error::malformed(
                        "Uncompressed data size does not match compression header",
                    ));
                }

                Ok(Cow::Owned(decompressed))
            }
            _ => Err(Error::unsupported("Unsupported compressed data.")),
        }
    }
}

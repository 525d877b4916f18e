//! Support for reading ELF files.
//!
//! Traits are provided for generic access to the 32-bit and 64-bit variants
//! of the raw structures in [`crate::elf`]. The backend itself is only
//! reachable through [`ObjectFile`](crate::read::ObjectFile).

mod file;
pub use file::*;
pub(crate) use file::{ElfBackend32, ElfBackend64};

mod section;
pub use section::*;

mod symbol;
pub use symbol::*;
pub(crate) use symbol::SymbolTable;

mod relocation;
pub use relocation::*;
pub(crate) use relocation::relocation_type_name;

mod dynamic;
pub use dynamic::*;
pub(crate) use dynamic::NeededLibraries;

mod compression;

//! Support for reading Mach-O files.
//!
//! Traits are provided for generic access to the 32-bit and 64-bit variants
//! of the raw structures in [`crate::macho`]. Fat (universal) files are not
//! supported.

mod file;
pub use file::*;
pub(crate) use file::{MachOBackend32, MachOBackend64};

mod load_command;
pub(crate) use load_command::*;

mod section;
pub use section::*;

mod symbol;
pub use symbol::*;
pub(crate) use symbol::SymbolTable;

mod relocation;
pub(crate) use relocation::relocation_type_name;

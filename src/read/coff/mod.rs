//! Support for reading COFF relocatable objects and PE images.
//!
//! Both formats share the file header, section headers, symbol table and
//! relocation entries defined in [`crate::pe`]. PE images add a DOS header,
//! an optional header and the import directory.

mod file;
pub(crate) use file::CoffBackend;

mod section;

mod symbol;
pub(crate) use symbol::SymbolTable;

mod relocation;
pub(crate) use relocation::relocation_type_name;

mod import;
pub(crate) use import::parse_import_names;

//! # `objinspect`
//!
//! The `objinspect` crate provides a format independent interface for
//! inspecting ELF, Mach-O and COFF/PE object files.
//!
//! An [`ObjectFile`] owns the file data, and hands out cursors over its
//! sections, symbols, relocations and needed libraries. Each cursor reports
//! the entity at its current position and is advanced explicitly.
//!
//! ## Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("path/to/binary")?;
//! let file = objinspect::ObjectFile::create(data)?;
//! let mut sections = file.sections();
//! while !sections.is_at_end() {
//!     println!("{} {:#x}", sections.name()?, sections.size()?);
//!     sections.move_next()?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Raw struct definitions
//!
//! The [`elf`], [`macho`] and [`pe`] modules contain the definitions of the
//! file format structures, using the endian types in [`endian`].

#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![no_std]
#![warn(rust_2018_idioms)]
// Style.
#![allow(clippy::collapsible_if)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::single_match)]
#![allow(clippy::type_complexity)]
// Occurs due to fallible iteration.
#![allow(clippy::should_implement_trait)]

#[allow(unused_imports)]
#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
#[allow(unused_imports)]
#[macro_use]
extern crate std;

#[cfg(all(feature = "logging", any(feature = "coff", feature = "elf", feature = "macho")))]
#[allow(unused_imports)]
#[macro_use]
extern crate log;

pub mod endian;
pub use endian::*;

#[macro_use]
pub mod pod;
pub use pod::{Bytes, Pod};

#[cfg(feature = "elf")]
pub mod elf;

#[cfg(feature = "macho")]
pub mod macho;

#[cfg(feature = "coff")]
pub mod pe;

pub mod read;
pub use read::*;

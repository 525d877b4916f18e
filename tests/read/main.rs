#![cfg(feature = "std")]

mod fixtures;

#[cfg(feature = "coff")]
mod coff;
#[cfg(feature = "elf")]
mod cursor;
#[cfg(feature = "elf")]
mod elf;
#[cfg(feature = "macho")]
mod macho;

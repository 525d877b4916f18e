//! Printing helpers shared by the `objinspect` demo binaries.

pub mod objdump;

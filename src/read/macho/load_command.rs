use core::mem;

use crate::endian::Endian;
use crate::macho;
use crate::pod::{Bytes, Pod};
use crate::read::{DataRange, ReadError, Result};

use super::Segment;

/// An iterator for the load commands from a [`MachHeader`](super::MachHeader).
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LoadCommandIterator<'data, E: Endian> {
    endian: E,
    data: Bytes<'data>,
    /// The file offset of `data`.
    offset: usize,
    ncmds: u32,
}

impl<'data, E: Endian> LoadCommandIterator<'data, E> {
    pub fn new(endian: E, data: &'data [u8], offset: usize, ncmds: u32) -> Self {
        LoadCommandIterator {
            endian,
            data: Bytes(data),
            offset,
            ncmds,
        }
    }

    /// Return the next load command.
    pub fn next(&mut self) -> Result<Option<LoadCommandData<'data, E>>> {
        if self.ncmds == 0 {
            return Ok(None);
        }
        let header = self
            .data
            .read_at::<macho::LoadCommand<E>>(0)
            .read_error("Invalid Mach-O load command header")?;
        let cmd = header.cmd.get(self.endian);
        let cmdsize = header.cmdsize.get(self.endian) as usize;
        if cmdsize < mem::size_of::<macho::LoadCommand<E>>() {
            return Err(crate::read::Error::malformed(
                "Invalid Mach-O load command size",
            ));
        }
        let data = self
            .data
            .read_bytes(cmdsize)
            .read_error("Invalid Mach-O load command size")?;
        let offset = self.offset;
        self.offset += cmdsize;
        self.ncmds -= 1;
        Ok(Some(LoadCommandData {
            endian: self.endian,
            cmd,
            offset,
            data,
        }))
    }
}

/// The data for a [`macho::LoadCommand`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct LoadCommandData<'data, E: Endian> {
    endian: E,
    pub cmd: u32,
    /// The file offset of the command.
    pub offset: usize,
    /// The data for the command, including the [`macho::LoadCommand`] header.
    data: Bytes<'data>,
}

impl<'data, E: Endian> LoadCommandData<'data, E> {
    /// Parse the data as the given type.
    pub fn data<T: Pod>(&self) -> Result<&'data T> {
        self.data
            .read_at(0)
            .read_error("Invalid Mach-O command size")
    }

    /// Try to parse this command as a segment command.
    ///
    /// Also returns the file offset and number of the section headers that
    /// follow the command.
    pub fn segment<S: Segment<Endian = E>>(&self) -> Result<Option<(&'data S, usize, u32)>> {
        if self.cmd != S::CMD {
            return Ok(None);
        }
        let segment = self.data::<S>()?;
        let nsects = segment.nsects(self.endian);
        self.data
            .read_slice_at::<S::Section>(mem::size_of::<S>(), nsects as usize)
            .read_error("Invalid Mach-O number of sections")?;
        Ok(Some((segment, self.offset + mem::size_of::<S>(), nsects)))
    }

    /// Try to parse this command as a [`macho::SymtabCommand`].
    pub fn symtab(&self) -> Result<Option<&'data macho::SymtabCommand<E>>> {
        if self.cmd == macho::LC_SYMTAB {
            Some(self.data()).transpose()
        } else {
            Ok(None)
        }
    }

    /// Try to parse this command as a [`macho::DylibCommand`] that loads a library.
    ///
    /// `LC_ID_DYLIB` is not a dependency, so it is ignored.
    pub fn load_dylib(&self) -> Result<Option<&'data macho::DylibCommand<E>>> {
        match self.cmd {
            macho::LC_LOAD_DYLIB
            | macho::LC_LOAD_WEAK_DYLIB
            | macho::LC_REEXPORT_DYLIB
            | macho::LC_LAZY_LOAD_DYLIB
            | macho::LC_LOAD_UPWARD_DYLIB => Some(self.data()).transpose(),
            _ => Ok(None),
        }
    }

    /// Return the file range of a string in this command.
    ///
    /// The range extends to the end of the command; the string is terminated
    /// by the first null byte within it.
    pub fn string_range(&self, s: macho::LcStr<E>) -> Result<DataRange> {
        let offset = s.offset.get(self.endian) as usize;
        if offset > self.data.len() {
            return Err(crate::read::Error::malformed(
                "Invalid Mach-O load command string offset",
            ));
        }
        Ok(DataRange::new(
            (self.offset + offset) as u64,
            (self.data.len() - offset) as u64,
        ))
    }
}

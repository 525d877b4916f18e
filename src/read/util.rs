use core::convert::TryInto;
use core::str;

use crate::pod::{Bytes, Pod};
use crate::read::{ReadError, Result};

/// A location within the file data.
///
/// Backends keep these instead of borrowed slices, because the file data is
/// owned by the `ObjectFile` that also owns the backend.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataRange {
    pub offset: u64,
    pub size: u64,
}

impl DataRange {
    #[inline]
    pub fn new(offset: u64, size: u64) -> Self {
        DataRange { offset, size }
    }

    /// Return the bytes of this range, or `None` if it is out of bounds.
    pub fn bytes<'data>(self, data: &'data [u8]) -> Option<&'data [u8]> {
        let offset: usize = self.offset.try_into().ok()?;
        let size: usize = self.size.try_into().ok()?;
        Bytes(data).read_bytes_at(offset, size).map(|bytes| bytes.0)
    }
}

/// A table of `count` entries of type `T` starting at `offset`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DataTable {
    pub offset: usize,
    pub count: usize,
}

impl DataTable {
    /// Validate the table against the file data.
    pub fn parse<T: Pod>(data: &[u8], offset: u64, count: u64) -> Option<Self> {
        let offset: usize = offset.try_into().ok()?;
        let count: usize = count.try_into().ok()?;
        Bytes(data).read_slice_at::<T>(offset, count)?;
        Some(DataTable { offset, count })
    }

    pub fn slice<'data, T: Pod>(self, data: &'data [u8]) -> Result<&'data [T]> {
        Bytes(data)
            .read_slice_at(self.offset, self.count)
            .read_error("Invalid table offset or size")
    }

    pub fn get<'data, T: Pod>(self, data: &'data [u8], index: usize) -> Result<&'data T> {
        self.slice::<T>(data)?
            .get(index)
            .read_error("Invalid table index")
    }
}

/// A table of zero delimited strings.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StringTable<'data> {
    data: Bytes<'data>,
}

impl<'data> StringTable<'data> {
    /// Interpret the given data as a string table.
    pub fn new(data: &'data [u8]) -> Self {
        StringTable { data: Bytes(data) }
    }

    /// Return the string table for the given range of the file data.
    ///
    /// An invalid range gives an empty table, so that every lookup fails.
    pub fn from_range(data: &'data [u8], range: DataRange) -> Self {
        StringTable::new(range.bytes(data).unwrap_or(&[]))
    }

    /// Return the string at the given offset.
    pub fn get(&self, offset: u32) -> Result<&'data [u8]> {
        self.data
            .read_string_at(offset as usize)
            .read_error("Invalid string table offset")
    }
}

/// Return the bytes of a fixed size name field, up to the first null byte.
pub(crate) fn fixed_name(name: &[u8]) -> &[u8] {
    match memchr::memchr(b'\0', name) {
        Some(end) => &name[..end],
        None => name,
    }
}

/// Convert a name to a string.
pub(crate) fn name_str<'data>(name: &'data [u8], error: &'static str) -> Result<&'data str> {
    str::from_utf8(name).ok().read_error(error)
}

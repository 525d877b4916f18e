//! In-place views of file format structures.
//!
//! Every structure in the format modules is built from bytes and from the
//! unaligned integers in [`crate::endian`], so it has an alignment of 1 and
//! can be viewed at any offset of the file data without copying.

use core::{fmt, mem, slice};

/// A file format structure that can be viewed directly in file data.
///
/// # Safety
///
/// An implementor must:
/// - be `#[repr(C)]` or `#[repr(transparent)]`
/// - have an alignment of 1
/// - have no padding and no invalid bit patterns
pub unsafe trait Pod: Copy + 'static {}

/// View `count` consecutive values of `T` at the start of `data`.
///
/// Returns the values and the data that follows them.
#[inline]
fn view<T: Pod>(data: &[u8], count: usize) -> Option<(&[T], &[u8])> {
    debug_assert_eq!(mem::align_of::<T>(), 1);
    let size = count.checked_mul(mem::size_of::<T>())?;
    if size > data.len() {
        return None;
    }
    let (head, tail) = data.split_at(size);
    // Safety: `head` holds exactly `count` values, `T` has an alignment of 1,
    // and `Pod` guarantees every bit pattern is valid.
    let values = unsafe { slice::from_raw_parts(head.as_ptr().cast::<T>(), count) };
    Some((values, tail))
}

/// A borrowed range of file data with bounds checked accessors.
///
/// None of the accessors panic: a read that does not fit returns `None`.
/// A failed read leaves the remaining data untouched.
#[derive(Default, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'data>(pub &'data [u8]);

impl<'data> fmt::Debug for Bytes<'data> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes({} bytes:", self.0.len())?;
        for byte in self.0.iter().take(16) {
            write!(f, " {:02x}", byte)?;
        }
        if self.0.len() > 16 {
            f.write_str(" ..")?;
        }
        f.write_str(")")
    }
}

impl<'data> Bytes<'data> {
    /// The number of bytes in the view.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Return true if the view holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the data starting at `offset`.
    #[inline]
    fn tail(self, offset: usize) -> Option<Bytes<'data>> {
        self.0.get(offset..).map(Bytes)
    }

    /// Take `count` bytes from the front.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Option<Bytes<'data>> {
        if count > self.0.len() {
            return None;
        }
        let (head, tail) = self.0.split_at(count);
        self.0 = tail;
        Some(Bytes(head))
    }

    /// Return `count` bytes at `offset`.
    #[inline]
    pub fn read_bytes_at(self, offset: usize, count: usize) -> Option<Bytes<'data>> {
        let end = offset.checked_add(count)?;
        self.0.get(offset..end).map(Bytes)
    }

    /// Take a `T` from the front.
    #[inline]
    pub fn read<T: Pod>(&mut self) -> Option<&'data T> {
        let (value, tail) = view::<T>(self.0, 1)?;
        self.0 = tail;
        value.first()
    }

    /// Return the `T` at `offset`.
    #[inline]
    pub fn read_at<T: Pod>(self, offset: usize) -> Option<&'data T> {
        let (value, _) = view::<T>(self.tail(offset)?.0, 1)?;
        value.first()
    }

    /// Take `count` values of `T` from the front.
    #[inline]
    pub fn read_slice<T: Pod>(&mut self, count: usize) -> Option<&'data [T]> {
        let (values, tail) = view::<T>(self.0, count)?;
        self.0 = tail;
        Some(values)
    }

    /// Return `count` values of `T` at `offset`.
    #[inline]
    pub fn read_slice_at<T: Pod>(self, offset: usize, count: usize) -> Option<&'data [T]> {
        view::<T>(self.tail(offset)?.0, count).map(|(values, _)| values)
    }

    /// Return the NUL terminated string at `offset`, without the terminator.
    ///
    /// The bytes are not decoded. A string that runs to the end of the data
    /// without a terminator is rejected.
    #[inline]
    pub fn read_string_at(self, offset: usize) -> Option<&'data [u8]> {
        let data = self.tail(offset)?.0;
        let end = memchr::memchr(b'\0', data)?;
        Some(&data[..end])
    }
}

macro_rules! unsafe_impl_pod {
    ($($struct_name:ident),+ $(,)?) => {
        $(
            const _: () = assert!(core::mem::align_of::<$struct_name>() == 1);
            unsafe impl crate::pod::Pod for $struct_name { }
        )+
    }
}

macro_rules! unsafe_impl_endian_pod {
    ($($struct_name:ident),+ $(,)?) => {
        $(
            const _: () = assert!(
                core::mem::align_of::<$struct_name<crate::endian::LittleEndian>>() == 1
            );
            unsafe impl<E: crate::endian::Endian> crate::pod::Pod for $struct_name<E> { }
        )+
    }
}

unsafe impl Pod for u8 {}
unsafe impl<const N: usize, T: Pod> Pod for [T; N] {}

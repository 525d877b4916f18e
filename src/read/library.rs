use core::fmt;

use crate::read::{name_str, Backend, Error, FileRef, Result};

/// A cursor over the shared libraries that an [`ObjectFile`](crate::ObjectFile) depends on.
///
/// For ELF files these are the `DT_NEEDED` entries, for Mach-O files the
/// dylib load commands, and for PE images the DLLs in the import directory.
/// Relocatable objects have no needed libraries.
pub struct NeededLibraryIterator<'file> {
    file: FileRef<'file>,
    index: usize,
    count: usize,
}

impl<'file> NeededLibraryIterator<'file> {
    pub(crate) fn new(file: FileRef<'file>) -> Self {
        NeededLibraryIterator {
            file,
            index: 0,
            count: file.backend.needed_library_count(),
        }
    }

    /// Return true if the cursor has been advanced past the last library.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.count
    }

    /// Advance to the next library.
    ///
    /// Returns an error if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Needed library cursor is at the end"));
        }
        self.index += 1;
        Ok(())
    }

    /// Return a view of the current library.
    pub fn current(&self) -> Result<NeededLibrary<'file>> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Needed library cursor is at the end"));
        }
        Ok(NeededLibrary {
            file: self.file,
            index: self.index,
        })
    }

    /// The path of the current library, as recorded in the file.
    pub fn path(&self) -> Result<&'file str> {
        self.current()?.path()
    }
}

impl<'file> Iterator for NeededLibraryIterator<'file> {
    type Item = NeededLibrary<'file>;

    fn next(&mut self) -> Option<NeededLibrary<'file>> {
        let library = self.current().ok()?;
        self.index += 1;
        Some(library)
    }
}

impl<'file> fmt::Debug for NeededLibraryIterator<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NeededLibraryIterator")
            .field("index", &self.index)
            .field("count", &self.count)
            .finish()
    }
}

/// A shared library that an [`ObjectFile`](crate::ObjectFile) depends on.
#[derive(Clone, Copy)]
pub struct NeededLibrary<'file> {
    file: FileRef<'file>,
    index: usize,
}

impl<'file> NeededLibrary<'file> {
    /// The raw path of the library.
    pub fn path_bytes(&self) -> Result<&'file [u8]> {
        self.file.backend.needed_library(self.file.data, self.index)
    }

    /// The path of the library.
    ///
    /// This is usually a file name such as `libc.so.6`, but may be an
    /// install name such as `/usr/lib/libSystem.B.dylib`.
    pub fn path(&self) -> Result<&'file str> {
        name_str(self.path_bytes()?, "Non UTF-8 library path")
    }
}

impl<'file> fmt::Debug for NeededLibrary<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("NeededLibrary");
        s.field("index", &self.index);
        if let Ok(path) = self.path() {
            s.field("path", &path);
        }
        s.finish()
    }
}

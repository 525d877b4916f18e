use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt::{self, Write};

use crate::read::{
    Backend, Error, FileRef, RelocationInfo, Result, SectionIndex, SymbolIndex, SymbolIterator,
};

/// The target referenced by a relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RelocationTarget {
    /// The target is a symbol.
    Symbol(SymbolIndex),
    /// The target is the start of a section.
    Section(SectionIndex),
    /// The target is an address.
    ///
    /// Used by Mach-O scattered relocations.
    Address(u64),
    /// The relocation has no target, such as for base relative relocations.
    Absolute,
}

/// A cursor over the relocations that apply to one section.
///
/// The cursor also implements [`Iterator`]. Each call to `next` yields a
/// [`Relocation`] view of the current relocation and advances the cursor.
pub struct RelocationIterator<'file> {
    file: FileRef<'file>,
    section: SectionIndex,
    index: usize,
    count: usize,
}

impl<'file> RelocationIterator<'file> {
    pub(crate) fn new(file: FileRef<'file>, section: SectionIndex) -> Result<Self> {
        let count = file.backend.relocation_count(file.data, section)?;
        Ok(RelocationIterator {
            file,
            section,
            index: 0,
            count,
        })
    }

    /// The index of the section that the relocations apply to.
    #[inline]
    pub fn section_index(&self) -> SectionIndex {
        self.section
    }

    /// Return true if the cursor has been advanced past the last relocation.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.index >= self.count
    }

    /// Advance to the next relocation.
    ///
    /// Returns an error if the cursor is already at the end. The cursor
    /// position is unchanged in that case.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Relocation cursor is at the end"));
        }
        self.index += 1;
        Ok(())
    }

    /// Return a view of the current relocation.
    pub fn current(&self) -> Result<Relocation<'file>> {
        if self.is_at_end() {
            return Err(Error::invalid_state("Relocation cursor is at the end"));
        }
        Ok(Relocation {
            file: self.file,
            section: self.section,
            index: self.index,
        })
    }

    /// The address of the place that the current relocation modifies.
    pub fn address(&self) -> Result<u64> {
        self.current()?.address()
    }

    /// The offset of the current relocation from the start of its section.
    pub fn offset(&self) -> Result<u64> {
        self.current()?.offset()
    }

    /// A symbol cursor positioned at the symbol of the current relocation.
    pub fn symbol(&self) -> Result<SymbolIterator<'file>> {
        self.current()?.symbol()
    }

    /// The raw type of the current relocation.
    pub fn relocation_type(&self) -> Result<u64> {
        self.current()?.relocation_type()
    }

    /// The name of the type of the current relocation.
    pub fn type_name(&self) -> Result<String> {
        self.current()?.type_name()
    }

    /// The target of the current relocation, formatted like `objdump -r`.
    pub fn value_string(&self) -> Result<String> {
        self.current()?.value_string()
    }

    /// The explicit addend of the current relocation.
    pub fn addend(&self) -> Result<i64> {
        self.current()?.addend()
    }

    /// Return true if the addend of the current relocation is stored at the place.
    pub fn has_implicit_addend(&self) -> Result<bool> {
        self.current()?.has_implicit_addend()
    }
}

impl<'file> Iterator for RelocationIterator<'file> {
    type Item = Relocation<'file>;

    fn next(&mut self) -> Option<Relocation<'file>> {
        let relocation = self.current().ok()?;
        self.index += 1;
        Some(relocation)
    }
}

impl<'file> fmt::Debug for RelocationIterator<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelocationIterator")
            .field("section", &self.section)
            .field("index", &self.index)
            .field("count", &self.count)
            .finish()
    }
}

/// A relocation entry.
#[derive(Clone, Copy)]
pub struct Relocation<'file> {
    file: FileRef<'file>,
    section: SectionIndex,
    index: usize,
}

impl<'file> Relocation<'file> {
    #[inline]
    fn info(&self) -> Result<RelocationInfo> {
        self.file
            .backend
            .relocation(self.file.data, self.section, self.index)
    }

    /// The address of the place that the relocation modifies.
    pub fn address(&self) -> Result<u64> {
        self.info().map(|info| info.address)
    }

    /// The offset of the place from the start of the section.
    pub fn offset(&self) -> Result<u64> {
        self.info().map(|info| info.offset)
    }

    /// A symbol cursor positioned at the symbol that the relocation references.
    ///
    /// The cursor is at the end if the relocation does not reference a symbol.
    pub fn symbol(&self) -> Result<SymbolIterator<'file>> {
        let info = self.info()?;
        Ok(match info.symbol {
            Some((table, index)) => SymbolIterator::at(self.file, table, Some(index)),
            None => SymbolIterator::at(self.file, crate::read::SymbolTableKind::Static, None),
        })
    }

    /// The target of the relocation.
    pub fn target(&self) -> Result<RelocationTarget> {
        self.info().map(|info| info.target)
    }

    /// The raw relocation type.
    pub fn relocation_type(&self) -> Result<u64> {
        self.info().map(|info| u64::from(info.r_type))
    }

    /// The name of the relocation type, such as `R_X86_64_PC32`.
    ///
    /// Unknown types are named `Unknown`.
    pub fn type_name(&self) -> Result<String> {
        let info = self.info()?;
        let name = self
            .file
            .backend
            .relocation_type_name(info.r_type)
            .unwrap_or("Unknown");
        Ok(name.to_owned())
    }

    /// The explicit addend. This is zero for relocations with an implicit addend.
    pub fn addend(&self) -> Result<i64> {
        self.info().map(|info| info.addend)
    }

    /// Return true if the addend is stored at the place instead of in the relocation.
    pub fn has_implicit_addend(&self) -> Result<bool> {
        self.info().map(|info| info.implicit_addend)
    }

    /// Format the target of the relocation like `objdump -r`.
    ///
    /// This is the symbol name, the section name for relocations against a
    /// section, the address for scattered relocations, or `*ABS*`. A non-zero
    /// explicit addend is appended as `+0x10` or `-0x4`.
    pub fn value_string(&self) -> Result<String> {
        let info = self.info()?;
        let file = self.file;
        let mut value = match (info.target, info.symbol) {
            (RelocationTarget::Symbol(_), Some((table, index))) => {
                let name = file.backend.symbol_name(file.data, table, index)?;
                String::from_utf8_lossy(name).into_owned()
            }
            (RelocationTarget::Section(index), _) => {
                let name = file.backend.section_name(file.data, index)?;
                String::from_utf8_lossy(name).into_owned()
            }
            (RelocationTarget::Address(address), _) => format!("0x{:x}", address),
            _ => String::from("*ABS*"),
        };
        if !info.implicit_addend && info.addend != 0 {
            let sign = if info.addend < 0 { '-' } else { '+' };
            // Formatting into a String cannot fail.
            let _ = write!(value, "{}0x{:x}", sign, info.addend.unsigned_abs());
        }
        Ok(value)
    }
}

impl<'file> fmt::Debug for Relocation<'file> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Relocation");
        s.field("section", &self.section).field("index", &self.index);
        if let Ok(info) = self.info() {
            s.field("offset", &info.offset)
                .field("type", &info.r_type)
                .field("target", &info.target)
                .field("addend", &info.addend);
        }
        s.finish()
    }
}

/// Define a function that maps relocation type constants to their names.
macro_rules! relocation_names {
    ($vis:vis fn $name:ident($ty:ty) { $($constant:path),+ $(,)? }) => {
        $vis fn $name(r_type: $ty) -> Option<&'static str> {
            #[allow(unreachable_patterns)]
            match r_type {
                $($constant => Some($crate::read::relocation_name(stringify!($constant))),)+
                _ => None,
            }
        }
    };
}

/// Strip the module path from a stringified constant.
pub(crate) fn relocation_name(path: &'static str) -> &'static str {
    match path.rfind(':') {
        Some(colon) => path[colon + 1..].trim(),
        None => path,
    }
}

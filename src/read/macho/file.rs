use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem;

use crate::endian::{self, BigEndian, Endian, Endianness};
use crate::macho;
use crate::pod::{Bytes, Pod};
use crate::read::{
    self, fixed_name, Architecture, Backend, BinaryFormat, DataRange, DataTable, Error,
    ObjectKind, ReadError, RelocationInfo, RelocationTarget, Result, SectionIndex, SectionInfo,
    StringTable, SymbolIndex, SymbolInfo, SymbolSection, SymbolTableKind,
};

use super::{relocation_type_name, LoadCommandIterator, Nlist, Section, Segment, SymbolTable};

/// A backend for 32-bit Mach-O files.
pub(crate) type MachOBackend32<Endian = Endianness> = MachOBackend<macho::MachHeader32<Endian>>;
/// A backend for 64-bit Mach-O files.
pub(crate) type MachOBackend64<Endian = Endianness> = MachOBackend<macho::MachHeader64<Endian>>;

/// The backend for Mach-O files.
///
/// Mach-O files have a single symbol table, so the dynamic symbol table is
/// always empty.
#[derive(Debug)]
pub(crate) struct MachOBackend<Mach: MachHeader> {
    endian: Mach::Endian,
    cputype: u32,
    filetype: u32,
    /// The file offsets of the section headers, in load command order.
    sections: Vec<usize>,
    symbols: SymbolTable,
    /// The path strings of the dylib load commands.
    needed: Vec<DataRange>,
    marker: PhantomData<Mach>,
}

impl<Mach: MachHeader> MachOBackend<Mach> {
    /// Parse the raw Mach-O file data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Bytes(data)
            .read_at::<Mach>(0)
            .read_error("Invalid Mach-O header size or alignment")?;
        if !header.is_supported() {
            return Err(Error::malformed("Unsupported Mach-O header"));
        }
        let endian = header.endian().read_error("Unsupported Mach-O endian")?;

        let mut sections = Vec::new();
        let mut symbols = SymbolTable::default();
        let mut needed = Vec::new();
        let mut commands = header.load_commands(endian, data)?;
        while let Some(command) = commands.next()? {
            if let Some((_segment, offset, nsects)) = command.segment::<Mach::Segment>()? {
                let size = mem::size_of::<Mach::Section>();
                sections.extend((0..nsects as usize).map(|index| offset + index * size));
            } else if let Some(symtab) = command.symtab()? {
                symbols = parse_symbol_table::<Mach>(endian, data, symtab).unwrap_or_else(|_err| {
                    #[cfg(feature = "logging")]
                    warn!("Skipping malformed Mach-O symbol table: {}", _err);
                    SymbolTable::default()
                });
            } else if let Some(dylib) = command.load_dylib()? {
                needed.push(command.string_range(dylib.dylib.name)?);
            }
        }

        Ok(MachOBackend {
            endian,
            cputype: header.cputype(endian),
            filetype: header.filetype(endian),
            sections,
            symbols,
            needed,
            marker: PhantomData,
        })
    }

    fn section_header<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<&'data Mach::Section> {
        let offset = *self
            .sections
            .get(index.0)
            .read_error("Invalid Mach-O section index")?;
        Bytes(data)
            .read_at(offset)
            .read_error("Invalid Mach-O section header offset")
    }

    fn nlist<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data Mach::Nlist> {
        match table {
            SymbolTableKind::Static => self
                .symbols
                .symbols
                .get::<Mach::Nlist>(data, index.0)
                .read_error("Invalid Mach-O symbol index"),
            SymbolTableKind::Dynamic => Err(Error::malformed("Invalid Mach-O symbol index")),
        }
    }
}

fn parse_symbol_table<Mach: MachHeader>(
    endian: Mach::Endian,
    data: &[u8],
    symtab: &macho::SymtabCommand<Mach::Endian>,
) -> Result<SymbolTable> {
    let symbols = DataTable::parse::<Mach::Nlist>(
        data,
        symtab.symoff.get(endian).into(),
        symtab.nsyms.get(endian).into(),
    )
    .read_error("Invalid Mach-O symbol table offset or size")?;
    let strings = DataRange::new(
        symtab.stroff.get(endian).into(),
        symtab.strsize.get(endian).into(),
    );
    strings
        .bytes(data)
        .read_error("Invalid Mach-O string table offset or size")?;
    Ok(SymbolTable { symbols, strings })
}

impl<Mach: MachHeader> read::private::Sealed for MachOBackend<Mach> {}

impl<Mach: MachHeader> Backend for MachOBackend<Mach> {
    fn format(&self) -> BinaryFormat {
        BinaryFormat::MachO
    }

    fn architecture(&self) -> Architecture {
        match self.cputype {
            macho::CPU_TYPE_ARM => Architecture::Arm,
            macho::CPU_TYPE_ARM64 => Architecture::Aarch64,
            macho::CPU_TYPE_X86 => Architecture::I386,
            macho::CPU_TYPE_X86_64 => Architecture::X86_64,
            macho::CPU_TYPE_POWERPC => Architecture::PowerPc,
            macho::CPU_TYPE_POWERPC64 => Architecture::PowerPc64,
            _ => Architecture::Unknown,
        }
    }

    #[inline]
    fn is_64(&self) -> bool {
        Mach::is_type_64()
    }

    #[inline]
    fn is_little_endian(&self) -> bool {
        self.endian.is_little_endian()
    }

    fn kind(&self) -> ObjectKind {
        match self.filetype {
            macho::MH_OBJECT => ObjectKind::Relocatable,
            macho::MH_EXECUTE => ObjectKind::Executable,
            macho::MH_FVMLIB | macho::MH_DYLIB | macho::MH_BUNDLE => ObjectKind::Dynamic,
            macho::MH_CORE => ObjectKind::Core,
            _ => ObjectKind::Unknown,
        }
    }

    #[inline]
    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn section_name<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        Ok(fixed_name(self.section_header(data, index)?.sectname()))
    }

    fn section_info(&self, data: &[u8], index: SectionIndex) -> Result<SectionInfo> {
        let endian = self.endian;
        let section = self.section_header(data, index)?;
        Ok(SectionInfo {
            address: section.addr(endian).into(),
            size: section.size(endian).into(),
            align: section.alignment(endian),
            file_range: section.file_range(endian),
            kind: section.kind(endian),
            is_text: section.is_text(endian),
            is_data: section.is_data(endian),
            is_bss: section.is_bss(endian),
        })
    }

    fn section_data<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        match self.section_header(data, index)?.file_range(self.endian) {
            Some((offset, size)) => DataRange::new(offset, size)
                .bytes(data)
                .read_error("Invalid Mach-O section size or offset"),
            None => Ok(&[]),
        }
    }

    fn relocation_count(&self, data: &[u8], section: SectionIndex) -> Result<usize> {
        Ok(self.section_header(data, section)?.nreloc(self.endian) as usize)
    }

    fn relocation(
        &self,
        data: &[u8],
        section: SectionIndex,
        index: usize,
    ) -> Result<RelocationInfo> {
        let endian = self.endian;
        let header = self.section_header(data, section)?;
        if index >= header.nreloc(endian) as usize {
            return Err(Error::malformed("Invalid Mach-O relocation index"));
        }
        let relocations = DataTable::parse::<macho::Relocation<Mach::Endian>>(
            data,
            header.reloff(endian).into(),
            header.nreloc(endian).into(),
        )
        .read_error("Invalid Mach-O relocation offset or size")?;
        let relocation = *relocations.get::<macho::Relocation<Mach::Endian>>(data, index)?;

        let (offset, r_type, symbol, target) = if relocation.r_scattered(endian, self.cputype) {
            let info = relocation.scattered_info(endian);
            (
                info.r_address,
                info.r_type,
                None,
                RelocationTarget::Address(info.r_value.into()),
            )
        } else {
            let info = relocation.info(endian);
            let (symbol, target) = if info.r_extern {
                let index = SymbolIndex(info.r_symbolnum as usize);
                (
                    Some((SymbolTableKind::Static, index)),
                    RelocationTarget::Symbol(index),
                )
            } else if info.r_symbolnum == u32::from(macho::R_ABS) {
                (None, RelocationTarget::Absolute)
            } else {
                // Section ordinals are one based.
                let index = SectionIndex(info.r_symbolnum as usize - 1);
                (None, RelocationTarget::Section(index))
            };
            (info.r_address, info.r_type, symbol, target)
        };

        let offset = u64::from(offset);
        let sh_addr: u64 = header.addr(endian).into();
        Ok(RelocationInfo {
            offset,
            address: sh_addr.wrapping_add(offset),
            r_type: r_type.into(),
            symbol,
            target,
            addend: 0,
            implicit_addend: true,
        })
    }

    fn relocation_type_name(&self, r_type: u32) -> Option<&'static str> {
        relocation_type_name(self.cputype, r_type)
    }

    fn symbol_count(&self, table: SymbolTableKind) -> usize {
        match table {
            SymbolTableKind::Static => self.symbols.symbols.count,
            SymbolTableKind::Dynamic => 0,
        }
    }

    fn symbol_name<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data [u8]> {
        let nlist = self.nlist(data, table, index)?;
        StringTable::from_range(data, self.symbols.strings)
            .get(nlist.n_strx(self.endian))
            .read_error("Invalid Mach-O symbol name offset")
    }

    fn symbol_info(
        &self,
        data: &[u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<SymbolInfo> {
        let endian = self.endian;
        let nlist = self.nlist(data, table, index)?;
        let section = nlist.section(endian);
        let header = match section {
            SymbolSection::Section(index) => self.section_header(data, index).ok(),
            _ => None,
        };

        let n_value: u64 = nlist.n_value(endian).into();
        // The value of a common symbol is its size.
        let (address, size) = if nlist.is_common(endian) {
            (0, n_value)
        } else {
            (n_value, 0)
        };
        let file_offset = header.and_then(|header| {
            let (offset, _) = header.file_range(endian)?;
            let sh_addr: u64 = header.addr(endian).into();
            address
                .checked_sub(sh_addr)
                .and_then(|delta| offset.checked_add(delta))
        });

        Ok(SymbolInfo {
            address,
            size,
            file_offset,
            section,
            symbol_type: nlist.symbol_type(endian, header),
            flags: nlist.flags(endian, header),
            nm_char: nlist.nm_char(endian, header),
        })
    }

    #[inline]
    fn needed_library_count(&self) -> usize {
        self.needed.len()
    }

    fn needed_library<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        let range = self
            .needed
            .get(index)
            .read_error("Invalid Mach-O needed library index")?;
        let bytes = range
            .bytes(data)
            .read_error("Invalid Mach-O dylib name offset")?;
        match memchr::memchr(b'\0', bytes) {
            Some(end) => Ok(&bytes[..end]),
            None => Err(Error::malformed("Missing Mach-O dylib name terminator")),
        }
    }
}

/// A trait for generic access to [`macho::MachHeader32`] and [`macho::MachHeader64`].
#[allow(missing_docs)]
pub trait MachHeader: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;
    type Segment: Segment<Endian = Self::Endian, Section = Self::Section>;
    type Section: Section<Endian = Self::Endian>;
    type Nlist: Nlist<Endian = Self::Endian>;

    /// Return true if this type is a 64-bit header.
    fn is_type_64() -> bool;

    /// Return true if the `magic` field signifies big-endian.
    fn is_big_endian(&self) -> bool;

    /// Return true if the `magic` field signifies little-endian.
    fn is_little_endian(&self) -> bool;

    fn magic(&self) -> u32;
    fn cputype(&self, endian: Self::Endian) -> u32;
    fn filetype(&self, endian: Self::Endian) -> u32;
    fn ncmds(&self, endian: Self::Endian) -> u32;
    fn sizeofcmds(&self, endian: Self::Endian) -> u32;

    // Provided methods.

    fn is_supported(&self) -> bool {
        self.is_little_endian() || self.is_big_endian()
    }

    fn endian(&self) -> Option<Self::Endian> {
        Self::Endian::from_big_endian(self.is_big_endian())
    }

    /// Return an iterator over the load commands, which directly follow the header.
    fn load_commands<'data>(
        &self,
        endian: Self::Endian,
        data: &'data [u8],
    ) -> Result<LoadCommandIterator<'data, Self::Endian>> {
        let offset = mem::size_of::<Self>();
        let commands = Bytes(data)
            .read_bytes_at(offset, self.sizeofcmds(endian) as usize)
            .read_error("Invalid Mach-O load command table size")?;
        Ok(LoadCommandIterator::new(
            endian,
            commands.0,
            offset,
            self.ncmds(endian),
        ))
    }
}

macro_rules! impl_mach_header {
    (
        $header:ident, $word:ty, $is_64:literal, $magic:path, $cigam:path,
        $segment:ident, $section:ident, $nlist:ident
    ) => {
        impl<Endian: endian::Endian> MachHeader for macho::$header<Endian> {
            type Word = $word;
            type Endian = Endian;
            type Segment = macho::$segment<Endian>;
            type Section = macho::$section<Endian>;
            type Nlist = macho::$nlist<Endian>;

            fn is_type_64() -> bool {
                $is_64
            }

            fn is_big_endian(&self) -> bool {
                self.magic() == $magic
            }

            fn is_little_endian(&self) -> bool {
                self.magic() == $cigam
            }

            fn magic(&self) -> u32 {
                self.magic.get(BigEndian)
            }

            field_getters! {
                cputype: u32,
                filetype: u32,
                ncmds: u32,
                sizeofcmds: u32,
            }
        }
    };
}

impl_mach_header!(
    MachHeader32, u32, false, macho::MH_MAGIC, macho::MH_CIGAM,
    SegmentCommand32, Section32, Nlist32
);
impl_mach_header!(
    MachHeader64, u64, true, macho::MH_MAGIC_64, macho::MH_CIGAM_64,
    SegmentCommand64, Section64, Nlist64
);

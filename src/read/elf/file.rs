use alloc::vec::Vec;
use core::convert::TryInto;
use core::fmt::Debug;
use core::marker::PhantomData;
use core::mem;

use crate::elf;
use crate::endian::{self, Endian, Endianness, U32};
use crate::pod::{Bytes, Pod};
use crate::read::{
    self, Architecture, Backend, BinaryFormat, CompressedData, DataRange, DataTable, Error,
    ObjectKind, ReadError, RelocationInfo, RelocationTarget, Result, SectionIndex, SectionInfo,
    StringTable, SymbolIndex, SymbolInfo, SymbolSection, SymbolTableKind,
};

use super::{
    compression, relocation_type_name, CompressionHeader, Dyn, NeededLibraries, Rel,
    SectionHeader, Sym, SymbolTable,
};

/// A backend for 32-bit ELF files.
pub(crate) type ElfBackend32<Endian = Endianness> = ElfBackend<elf::FileHeader32<Endian>>;
/// A backend for 64-bit ELF files.
pub(crate) type ElfBackend64<Endian = Endianness> = ElfBackend<elf::FileHeader64<Endian>>;

/// The backend for ELF files.
///
/// Records the locations of the section headers, the symbol tables and the
/// relocation sections of each section.
#[derive(Debug)]
pub(crate) struct ElfBackend<Elf: FileHeader> {
    endian: Elf::Endian,
    is_64: bool,
    e_type: u16,
    e_machine: u16,
    sections: DataTable,
    section_names: DataRange,
    symbols: SymbolTable,
    dynamic_symbols: SymbolTable,
    /// The relocation sections that apply to each section.
    relocations: Vec<Vec<SectionIndex>>,
    needed: NeededLibraries,
    marker: PhantomData<Elf>,
}

impl<Elf: FileHeader> ElfBackend<Elf> {
    /// Parse the raw ELF file data.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Bytes(data)
            .read_at::<Elf>(0)
            .read_error("Invalid ELF header size or alignment")?;
        if !header.is_supported() {
            return Err(Error::malformed("Unsupported ELF header"));
        }
        let endian = header.endian().read_error("Unsupported ELF endian")?;

        let sections = header.section_table(endian, data)?;
        let section_headers = sections.slice::<Elf::SectionHeader>(data)?;

        let section_names = match header.shstrndx(endian, data)? {
            0 => DataRange::default(),
            index => section_headers
                .get(index as usize)
                .read_error("Invalid ELF e_shstrndx")?
                .data_range(endian),
        };

        let symbols = parse_symbol_table::<Elf>(endian, data, section_headers, elf::SHT_SYMTAB)
            .unwrap_or_else(|_err| {
                #[cfg(feature = "logging")]
                warn!("Skipping malformed ELF symbol table: {}", _err);
                SymbolTable::default()
            });
        let dynamic_symbols =
            parse_symbol_table::<Elf>(endian, data, section_headers, elf::SHT_DYNSYM)
                .unwrap_or_else(|_err| {
                    #[cfg(feature = "logging")]
                    warn!("Skipping malformed ELF dynamic symbol table: {}", _err);
                    SymbolTable::default()
                });

        // Map each section to the relocation sections that apply to it.
        let mut relocations = vec![Vec::new(); section_headers.len()];
        for (index, section) in section_headers.iter().enumerate() {
            if section.is_relocation(endian) {
                let target = section.sh_info(endian) as usize;
                if target == 0 {
                    continue;
                }
                if let Some(list) = relocations.get_mut(target) {
                    list.push(SectionIndex(index));
                }
            }
        }

        let needed = NeededLibraries::parse::<Elf>(endian, data, section_headers).unwrap_or_else(
            |_err| {
                #[cfg(feature = "logging")]
                warn!("Skipping malformed ELF dynamic section: {}", _err);
                NeededLibraries::default()
            },
        );

        Ok(ElfBackend {
            endian,
            is_64: header.is_class_64(),
            e_type: header.e_type(endian),
            e_machine: header.e_machine(endian),
            sections,
            section_names,
            symbols,
            dynamic_symbols,
            relocations,
            needed,
            marker: PhantomData,
        })
    }

    fn section_header<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<&'data Elf::SectionHeader> {
        self.sections
            .get::<Elf::SectionHeader>(data, index.0)
            .read_error("Invalid ELF section index")
    }

    fn symbol_table(&self, table: SymbolTableKind) -> &SymbolTable {
        match table {
            SymbolTableKind::Static => &self.symbols,
            SymbolTableKind::Dynamic => &self.dynamic_symbols,
        }
    }

    fn symbol<'data>(
        &self,
        data: &'data [u8],
        table: &SymbolTable,
        index: SymbolIndex,
    ) -> Result<&'data Elf::Sym> {
        table
            .symbols
            .get::<Elf::Sym>(data, index.0)
            .read_error("Invalid ELF symbol index")
    }

    /// Return the section of a symbol, using the extended section index table if needed.
    fn symbol_section(
        &self,
        data: &[u8],
        table: &SymbolTable,
        index: SymbolIndex,
        symbol: &Elf::Sym,
    ) -> SymbolSection {
        let xindex = table
            .shndx
            .get::<U32<Elf::Endian>>(data, index.0)
            .ok()
            .map(|x| x.get(self.endian));
        symbol.section(self.endian, xindex)
    }

    /// The number of entries in a relocation section.
    fn relocation_section_count(&self, section: &Elf::SectionHeader) -> usize {
        let size = match section.file_range(self.endian) {
            Some((_, size)) => size,
            None => return 0,
        };
        let entsize = if section.sh_type(self.endian) == elf::SHT_RELA {
            mem::size_of::<Elf::Rela>()
        } else {
            mem::size_of::<Elf::Rel>()
        };
        (size / entsize as u64).try_into().unwrap_or(0)
    }

    fn decode_relocation(
        &self,
        data: &[u8],
        target_section: SectionIndex,
        section: &Elf::SectionHeader,
        index: usize,
    ) -> Result<RelocationInfo> {
        let endian = self.endian;
        let offset = section
            .file_range(endian)
            .map(|(offset, _)| offset)
            .unwrap_or(0);
        let (r_offset, r_sym, r_type, addend, implicit_addend) =
            if section.sh_type(endian) == elf::SHT_RELA {
                let rel = read_entry::<Elf::Rela>(data, offset, index)?;
                let addend = rel.r_addend(endian);
                (rel.r_offset(endian), rel.r_sym(endian), rel.r_type(endian), addend, false)
            } else {
                let rel = read_entry::<Elf::Rel>(data, offset, index)?;
                (rel.r_offset(endian), rel.r_sym(endian), rel.r_type(endian), 0, true)
            };

        let sh_addr: u64 = self
            .section_header(data, target_section)?
            .sh_addr(endian)
            .into();
        let (offset, address) = if self.e_type == elf::ET_REL {
            (r_offset, sh_addr.wrapping_add(r_offset))
        } else {
            (r_offset.wrapping_sub(sh_addr), r_offset)
        };

        let table = if self.dynamic_symbols.section
            == Some(SectionIndex(section.sh_link(endian) as usize))
        {
            SymbolTableKind::Dynamic
        } else {
            SymbolTableKind::Static
        };
        let (symbol, target) = if r_sym == 0 {
            (None, RelocationTarget::Absolute)
        } else {
            let index = SymbolIndex(r_sym as usize);
            let symbols = self.symbol_table(table);
            let target = match self.symbol(data, symbols, index) {
                Ok(sym) if sym.st_type() == elf::STT_SECTION => {
                    match self.symbol_section(data, symbols, index, sym) {
                        SymbolSection::Section(section) => RelocationTarget::Section(section),
                        _ => RelocationTarget::Symbol(index),
                    }
                }
                _ => RelocationTarget::Symbol(index),
            };
            (Some((table, index)), target)
        };

        Ok(RelocationInfo {
            offset,
            address,
            r_type,
            symbol,
            target,
            addend,
            implicit_addend,
        })
    }
}

/// Read the entry at `index` of a table of `T` at `offset`.
fn read_entry<T: Pod>(data: &[u8], offset: u64, index: usize) -> Result<&T> {
    let offset: usize = offset
        .try_into()
        .ok()
        .read_error("Invalid ELF relocation section offset")?;
    let offset = index
        .checked_mul(mem::size_of::<T>())
        .and_then(|delta| offset.checked_add(delta))
        .read_error("Invalid ELF relocation index")?;
    Bytes(data)
        .read_at::<T>(offset)
        .read_error("Invalid ELF relocation section size or offset")
}

/// Find the first section of the given type and record its symbol table.
fn parse_symbol_table<Elf: FileHeader>(
    endian: Elf::Endian,
    data: &[u8],
    sections: &[Elf::SectionHeader],
    sh_type: u32,
) -> Result<SymbolTable> {
    let (index, section) = match sections
        .iter()
        .enumerate()
        .find(|(_, section)| section.sh_type(endian) == sh_type)
    {
        Some(found) => found,
        None => return Ok(SymbolTable::default()),
    };

    let (offset, size) = section.file_range(endian).unwrap_or((0, 0));
    let count = size / mem::size_of::<Elf::Sym>() as u64;
    let symbols = DataTable::parse::<Elf::Sym>(data, offset, count)
        .read_error("Invalid ELF symbol table offset or size")?;

    let strings = sections
        .get(section.sh_link(endian) as usize)
        .read_error("Invalid ELF string table index")?
        .data_range(endian);

    let mut shndx = DataTable::default();
    for section in sections {
        if section.sh_type(endian) == elf::SHT_SYMTAB_SHNDX
            && section.sh_link(endian) as usize == index
        {
            let (offset, size) = section.file_range(endian).unwrap_or((0, 0));
            shndx = DataTable::parse::<U32<Elf::Endian>>(data, offset, size / 4)
                .read_error("Invalid ELF symtab shndx offset or size")?;
        }
    }

    Ok(SymbolTable {
        section: Some(SectionIndex(index)),
        symbols,
        strings,
        shndx,
    })
}

impl<Elf: FileHeader> read::private::Sealed for ElfBackend<Elf> {}

impl<Elf: FileHeader> Backend for ElfBackend<Elf> {
    fn format(&self) -> BinaryFormat {
        BinaryFormat::Elf
    }

    fn architecture(&self) -> Architecture {
        match self.e_machine {
            elf::EM_AARCH64 => Architecture::Aarch64,
            elf::EM_ARM => Architecture::Arm,
            elf::EM_386 => Architecture::I386,
            elf::EM_MIPS => Architecture::Mips,
            elf::EM_PPC => Architecture::PowerPc,
            elf::EM_PPC64 => Architecture::PowerPc64,
            elf::EM_RISCV if self.is_64 => Architecture::Riscv64,
            elf::EM_RISCV => Architecture::Riscv32,
            elf::EM_X86_64 => Architecture::X86_64,
            _ => Architecture::Unknown,
        }
    }

    #[inline]
    fn is_64(&self) -> bool {
        self.is_64
    }

    #[inline]
    fn is_little_endian(&self) -> bool {
        self.endian.is_little_endian()
    }

    fn kind(&self) -> ObjectKind {
        match self.e_type {
            elf::ET_REL => ObjectKind::Relocatable,
            elf::ET_EXEC => ObjectKind::Executable,
            elf::ET_DYN => ObjectKind::Dynamic,
            elf::ET_CORE => ObjectKind::Core,
            _ => ObjectKind::Unknown,
        }
    }

    #[inline]
    fn section_count(&self) -> usize {
        self.sections.count
    }

    fn section_name<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        let offset = self.section_header(data, index)?.sh_name(self.endian);
        if offset == 0 {
            return Ok(&[]);
        }
        StringTable::from_range(data, self.section_names)
            .get(offset)
            .read_error("Invalid ELF section name offset")
    }

    fn section_info(&self, data: &[u8], index: SectionIndex) -> Result<SectionInfo> {
        let endian = self.endian;
        let section = self.section_header(data, index)?;
        Ok(SectionInfo {
            address: section.sh_addr(endian).into(),
            size: section.sh_size(endian).into(),
            align: section.sh_addralign(endian).into(),
            file_range: section.file_range(endian),
            kind: section.kind(endian),
            is_text: section.is_text(endian),
            is_data: section.is_data(endian),
            is_bss: section.is_bss(endian),
        })
    }

    fn section_data<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        self.section_header(data, index)?
            .data_range(self.endian)
            .bytes(data)
            .read_error("Invalid ELF section size or offset")
    }

    fn section_compressed_data<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<CompressedData<'data>> {
        let section = self.section_header(data, index)?;
        let section_data = self.section_data(data, index)?;
        if let Some(compressed) =
            compression::compressed_data::<Elf>(self.endian, section, section_data)?
        {
            return Ok(compressed);
        }
        let name = self.section_name(data, index)?;
        if let Some(compressed) = compression::gnu_compressed_data(name, section_data)? {
            return Ok(compressed);
        }
        Ok(CompressedData::none(section_data))
    }

    fn relocation_count(&self, data: &[u8], section: SectionIndex) -> Result<usize> {
        let chain = self
            .relocations
            .get(section.0)
            .read_error("Invalid ELF section index")?;
        let mut count = 0;
        for &index in chain {
            count += self.relocation_section_count(self.section_header(data, index)?);
        }
        Ok(count)
    }

    fn relocation(
        &self,
        data: &[u8],
        section: SectionIndex,
        index: usize,
    ) -> Result<RelocationInfo> {
        let chain = self
            .relocations
            .get(section.0)
            .read_error("Invalid ELF section index")?;
        let mut index = index;
        for &rel_index in chain {
            let rel_section = self.section_header(data, rel_index)?;
            let count = self.relocation_section_count(rel_section);
            if index < count {
                return self.decode_relocation(data, section, rel_section, index);
            }
            index -= count;
        }
        Err(Error::malformed("Invalid ELF relocation index"))
    }

    fn relocation_type_name(&self, r_type: u32) -> Option<&'static str> {
        relocation_type_name(self.e_machine, r_type)
    }

    #[inline]
    fn symbol_count(&self, table: SymbolTableKind) -> usize {
        self.symbol_table(table).symbols.count
    }

    /// The first entry of an ELF symbol table is reserved.
    fn first_symbol(&self, table: SymbolTableKind) -> usize {
        if self.symbol_count(table) > 0 {
            1
        } else {
            0
        }
    }

    fn symbol_name<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data [u8]> {
        let symbols = self.symbol_table(table);
        let symbol = self.symbol(data, symbols, index)?;
        let st_name = symbol.st_name(self.endian);
        if st_name == 0 && symbol.st_type() == elf::STT_SECTION {
            if let SymbolSection::Section(section) =
                self.symbol_section(data, symbols, index, symbol)
            {
                return self.section_name(data, section);
            }
        }
        StringTable::from_range(data, symbols.strings)
            .get(st_name)
            .read_error("Invalid ELF symbol name offset")
    }

    fn symbol_info(
        &self,
        data: &[u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<SymbolInfo> {
        let endian = self.endian;
        let symbols = self.symbol_table(table);
        let symbol = self.symbol(data, symbols, index)?;
        let section = self.symbol_section(data, symbols, index, symbol);

        let mut address: u64 = symbol.st_value(endian).into();
        let mut file_offset = None;
        let mut section_header = None;
        if let SymbolSection::Section(section_index) = section {
            if let Ok(header) = self.section_header(data, section_index) {
                let sh_addr: u64 = header.sh_addr(endian).into();
                if self.e_type == elf::ET_REL {
                    address = address.wrapping_add(sh_addr);
                }
                if let Some((sh_offset, _)) = header.file_range(endian) {
                    file_offset = address
                        .checked_sub(sh_addr)
                        .and_then(|delta| sh_offset.checked_add(delta));
                }
                let name = self.section_name(data, section_index).unwrap_or(&[]);
                section_header = Some((header, name));
            }
        }

        let name = self.symbol_name(data, table, index).unwrap_or(&[]);
        Ok(SymbolInfo {
            address,
            size: symbol.st_size(endian).into(),
            file_offset,
            section,
            symbol_type: symbol.symbol_type(endian),
            flags: symbol.flags(endian, self.e_machine, name),
            nm_char: symbol.nm_char(endian, section_header),
        })
    }

    #[inline]
    fn needed_library_count(&self) -> usize {
        self.needed.names.len()
    }

    fn needed_library<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        let offset = *self
            .needed
            .names
            .get(index)
            .read_error("Invalid ELF needed library index")?;
        StringTable::from_range(data, self.needed.strings)
            .get(offset)
            .read_error("Invalid ELF DT_NEEDED string offset")
    }
}

/// A trait for generic access to [`elf::FileHeader32`] and [`elf::FileHeader64`].
#[allow(missing_docs)]
pub trait FileHeader: Debug + Pod {
    // Ideally this would be a `u64: From<Word>`, but can't express that.
    type Word: Into<u64>;
    type Endian: endian::Endian;
    type SectionHeader: SectionHeader<Elf = Self, Endian = Self::Endian, Word = Self::Word>;
    type CompressionHeader: CompressionHeader<Endian = Self::Endian, Word = Self::Word>;
    type Sym: Sym<Endian = Self::Endian, Word = Self::Word>;
    type Rel: Rel<Endian = Self::Endian>;
    type Rela: Rel<Endian = Self::Endian>;
    type Dyn: Dyn<Endian = Self::Endian, Word = Self::Word>;

    fn e_ident(&self) -> &elf::Ident;
    fn e_type(&self, endian: Self::Endian) -> u16;
    fn e_machine(&self, endian: Self::Endian) -> u16;
    fn e_shoff(&self, endian: Self::Endian) -> Self::Word;
    fn e_shentsize(&self, endian: Self::Endian) -> u16;
    fn e_shnum(&self, endian: Self::Endian) -> u16;
    fn e_shstrndx(&self, endian: Self::Endian) -> u16;

    /// Return true if the class matches the header type.
    fn is_type_64(&self) -> bool;

    // Provided methods.

    fn is_supported(&self) -> bool {
        let ident = self.e_ident();
        ident.magic == elf::ELFMAG
            && (if self.is_type_64() {
                ident.class == elf::ELFCLASS64
            } else {
                ident.class == elf::ELFCLASS32
            })
            && (ident.data == elf::ELFDATA2LSB || ident.data == elf::ELFDATA2MSB)
            && ident.version == elf::EV_CURRENT
    }

    fn is_class_64(&self) -> bool {
        self.e_ident().class == elf::ELFCLASS64
    }

    fn is_big_endian(&self) -> bool {
        self.e_ident().data == elf::ELFDATA2MSB
    }

    fn endian(&self) -> Option<Self::Endian> {
        Self::Endian::from_big_endian(self.is_big_endian())
    }

    /// Section 0 is a special case because getting the section headers normally
    /// requires `shnum`, but `shnum` may be in the first section header.
    fn section_0<'data>(
        &self,
        endian: Self::Endian,
        data: &'data [u8],
    ) -> Result<Option<&'data Self::SectionHeader>> {
        let shoff: u64 = self.e_shoff(endian).into();
        if shoff == 0 {
            // No section headers is ok.
            return Ok(None);
        }
        let shentsize = usize::from(self.e_shentsize(endian));
        if shentsize != mem::size_of::<Self::SectionHeader>() {
            // Section header size must match.
            return Err(Error::malformed("Invalid ELF section header entry size"));
        }
        let shoff: usize = shoff
            .try_into()
            .ok()
            .read_error("Invalid ELF section header offset")?;
        Bytes(data)
            .read_at(shoff)
            .read_error("Invalid ELF section header offset or size")
            .map(Some)
    }

    /// Return the `e_shnum` field of the header. Handles extended values.
    fn shnum(&self, endian: Self::Endian, data: &[u8]) -> Result<usize> {
        let e_shnum = self.e_shnum(endian);
        if e_shnum > 0 {
            Ok(e_shnum.into())
        } else if let Some(section_0) = self.section_0(endian, data)? {
            let size: u64 = section_0.sh_size(endian).into();
            size.try_into()
                .ok()
                .read_error("Invalid ELF extended e_shnum")
        } else {
            Ok(0)
        }
    }

    /// Return the `e_shstrndx` field of the header. Handles extended values.
    fn shstrndx(&self, endian: Self::Endian, data: &[u8]) -> Result<u32> {
        let e_shstrndx = self.e_shstrndx(endian);
        let index = if e_shstrndx != elf::SHN_XINDEX {
            e_shstrndx.into()
        } else {
            self.section_0(endian, data)?
                .read_error("Missing ELF section headers for e_shstrndx overflow")?
                .sh_link(endian)
        };
        Ok(index)
    }

    /// Return the location of the section headers.
    fn section_table(&self, endian: Self::Endian, data: &[u8]) -> Result<DataTable> {
        let shoff: u64 = self.e_shoff(endian).into();
        if shoff == 0 {
            return Ok(DataTable::default());
        }
        let shnum = self.shnum(endian, data)?;
        DataTable::parse::<Self::SectionHeader>(data, shoff, shnum as u64)
            .read_error("Invalid ELF section header offset/size/alignment")
    }
}

macro_rules! impl_file_header {
    (
        $header:ident, $word:ty, $is_64:literal,
        $section:ident, $compression:ident, $sym:ident, $rel:ident, $rela:ident, $dyn:ident
    ) => {
        impl<Endian: endian::Endian> FileHeader for elf::$header<Endian> {
            type Word = $word;
            type Endian = Endian;
            type SectionHeader = elf::$section<Endian>;
            type CompressionHeader = elf::$compression<Endian>;
            type Sym = elf::$sym<Endian>;
            type Rel = elf::$rel<Endian>;
            type Rela = elf::$rela<Endian>;
            type Dyn = elf::$dyn<Endian>;

            #[inline]
            fn is_type_64(&self) -> bool {
                $is_64
            }

            #[inline]
            fn e_ident(&self) -> &elf::Ident {
                &self.e_ident
            }

            field_getters! {
                e_type: u16,
                e_machine: u16,
                e_shoff: $word,
                e_shentsize: u16,
                e_shnum: u16,
                e_shstrndx: u16,
            }
        }
    };
}

impl_file_header!(
    FileHeader32, u32, false,
    SectionHeader32, CompressionHeader32, Sym32, Rel32, Rela32, Dyn32
);
impl_file_header!(
    FileHeader64, u64, true,
    SectionHeader64, CompressionHeader64, Sym64, Rel64, Rela64, Dyn64
);

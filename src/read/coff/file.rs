use alloc::vec::Vec;
use core::mem;

use crate::endian::{LittleEndian as LE, U16, U32};
use crate::pe;
use crate::pod::Bytes;
use crate::read::{
    self, Architecture, Backend, BinaryFormat, DataRange, DataTable, Error, ObjectKind, ReadError,
    RelocationInfo, RelocationTarget, Result, SectionIndex, SectionInfo, SymbolIndex, SymbolInfo,
    SymbolSection, SymbolTableKind,
};

use super::{parse_import_names, relocation_type_name, SymbolTable};

/// The backend for COFF relocatable objects and PE images.
///
/// Both share the COFF file header, section headers and symbol table.
/// Images also have an optional header and may have an import directory.
#[derive(Debug)]
pub(crate) struct CoffBackend {
    is_image: bool,
    is_64: bool,
    machine: u16,
    characteristics: u16,
    image_base: u64,
    sections: DataTable,
    symbols: SymbolTable,
    /// The file offsets of the imported DLL names.
    imports: Vec<usize>,
}

impl CoffBackend {
    /// Parse the raw data of a COFF relocatable object.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let header = Bytes(data)
            .read_at::<pe::ImageFileHeader>(0)
            .read_error("Invalid COFF file header size or alignment")?;
        let machine = header.machine.get(LE);
        let sections = section_table(data, header, mem::size_of::<pe::ImageFileHeader>())?;
        let symbols = parse_symbol_table(header, data);
        Ok(CoffBackend {
            is_image: false,
            is_64: matches!(
                machine,
                pe::IMAGE_FILE_MACHINE_AMD64 | pe::IMAGE_FILE_MACHINE_ARM64
            ),
            machine,
            characteristics: header.characteristics.get(LE),
            image_base: 0,
            sections,
            symbols,
            imports: Vec::new(),
        })
    }

    /// Parse the raw data of a PE image.
    pub fn parse_pe(data: &[u8]) -> Result<Self> {
        let dos_header = Bytes(data)
            .read_at::<pe::ImageDosHeader>(0)
            .read_error("Invalid DOS header size or alignment")?;
        if dos_header.e_magic.get(LE) != pe::IMAGE_DOS_SIGNATURE {
            return Err(Error::malformed("Invalid DOS magic"));
        }
        let nt_offset = dos_header.e_lfanew.get(LE) as usize;
        let signature = Bytes(data)
            .read_at::<U32<LE>>(nt_offset)
            .read_error("Invalid PE headers offset")?
            .get(LE);
        if signature != pe::IMAGE_NT_SIGNATURE {
            return Err(Error::malformed("Invalid PE signature"));
        }
        let header_offset = nt_offset + mem::size_of::<U32<LE>>();
        let header = Bytes(data)
            .read_at::<pe::ImageFileHeader>(header_offset)
            .read_error("Invalid PE file header size or alignment")?;

        let optional_offset = header_offset + mem::size_of::<pe::ImageFileHeader>();
        let magic = Bytes(data)
            .read_at::<U16<LE>>(optional_offset)
            .read_error("Missing PE optional header")?
            .get(LE);
        let (is_64, image_base, directory_count, directory_offset) = match magic {
            pe::IMAGE_NT_OPTIONAL_HDR32_MAGIC => {
                let optional = Bytes(data)
                    .read_at::<pe::ImageOptionalHeader32>(optional_offset)
                    .read_error("Invalid PE optional header size or alignment")?;
                (
                    false,
                    u64::from(optional.image_base.get(LE)),
                    optional.number_of_rva_and_sizes.get(LE),
                    optional_offset + mem::size_of::<pe::ImageOptionalHeader32>(),
                )
            }
            pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC => {
                let optional = Bytes(data)
                    .read_at::<pe::ImageOptionalHeader64>(optional_offset)
                    .read_error("Invalid PE optional header size or alignment")?;
                (
                    true,
                    optional.image_base.get(LE),
                    optional.number_of_rva_and_sizes.get(LE),
                    optional_offset + mem::size_of::<pe::ImageOptionalHeader64>(),
                )
            }
            _ => return Err(Error::malformed("Invalid PE optional header magic")),
        };
        let directory_count =
            (directory_count as usize).min(pe::IMAGE_NUMBEROF_DIRECTORY_ENTRIES);
        let directories = Bytes(data)
            .read_slice_at::<pe::ImageDataDirectory>(directory_offset, directory_count)
            .read_error("Invalid PE number of RVA and sizes")?;

        let sections = section_table(data, header, optional_offset)?;
        let section_headers = sections.slice::<pe::ImageSectionHeader>(data)?;
        let imports = match directories.get(pe::IMAGE_DIRECTORY_ENTRY_IMPORT) {
            Some(directory) => parse_import_names(data, section_headers, directory)
                .unwrap_or_else(|_err| {
                    #[cfg(feature = "logging")]
                    warn!("Skipping malformed PE import directory: {}", _err);
                    Vec::new()
                }),
            None => Vec::new(),
        };
        let symbols = parse_symbol_table(header, data);

        Ok(CoffBackend {
            is_image: true,
            is_64,
            machine: header.machine.get(LE),
            characteristics: header.characteristics.get(LE),
            image_base,
            sections,
            symbols,
            imports,
        })
    }

    fn section_header<'data>(
        &self,
        data: &'data [u8],
        index: SectionIndex,
    ) -> Result<&'data pe::ImageSectionHeader> {
        self.sections
            .get::<pe::ImageSectionHeader>(data, index.0)
            .read_error("Invalid COFF section index")
    }

    /// The address of a section in memory, including the image base.
    fn section_address(&self, section: &pe::ImageSectionHeader) -> u64 {
        u64::from(section.virtual_address.get(LE)).wrapping_add(self.image_base)
    }

    /// Return the relocation table of a section, and the number of leading
    /// entries that hold the extended relocation count.
    fn relocation_table(
        &self,
        data: &[u8],
        section: &pe::ImageSectionHeader,
    ) -> Result<(DataTable, usize)> {
        let offset = u64::from(section.pointer_to_relocations.get(LE));
        let (count, extended) = section.relocation_count();
        if !extended {
            let table = DataTable::parse::<pe::ImageRelocation>(data, offset, count as u64)
                .read_error("Invalid COFF relocation offset or number")?;
            return Ok((table, 0));
        }
        // The first entry holds the count, including itself.
        let first = Bytes(data)
            .read_at::<pe::ImageRelocation>(offset as usize)
            .read_error("Invalid COFF relocation offset or number")?;
        let count = first.virtual_address.get(LE);
        if count == 0 {
            return Err(Error::malformed("Invalid COFF extended relocation count"));
        }
        let table = DataTable::parse::<pe::ImageRelocation>(data, offset, count.into())
            .read_error("Invalid COFF relocation offset or number")?;
        Ok((table, 1))
    }
}

/// Locate the section headers, which follow the optional header.
fn section_table(
    data: &[u8],
    header: &pe::ImageFileHeader,
    optional_offset: usize,
) -> Result<DataTable> {
    let offset = optional_offset + usize::from(header.size_of_optional_header.get(LE));
    DataTable::parse::<pe::ImageSectionHeader>(
        data,
        offset as u64,
        header.number_of_sections.get(LE).into(),
    )
    .read_error("Invalid COFF/PE section headers")
}

fn parse_symbol_table(header: &pe::ImageFileHeader, data: &[u8]) -> SymbolTable {
    SymbolTable::parse(header, data).unwrap_or_else(|_err| {
        #[cfg(feature = "logging")]
        warn!("Skipping malformed COFF symbol table: {}", _err);
        SymbolTable::default()
    })
}

impl read::private::Sealed for CoffBackend {}

impl Backend for CoffBackend {
    fn format(&self) -> BinaryFormat {
        if self.is_image {
            BinaryFormat::Pe
        } else {
            BinaryFormat::Coff
        }
    }

    fn architecture(&self) -> Architecture {
        match self.machine {
            pe::IMAGE_FILE_MACHINE_ARM | pe::IMAGE_FILE_MACHINE_THUMB | pe::IMAGE_FILE_MACHINE_ARMNT => {
                Architecture::Arm
            }
            pe::IMAGE_FILE_MACHINE_ARM64 => Architecture::Aarch64,
            pe::IMAGE_FILE_MACHINE_I386 => Architecture::I386,
            pe::IMAGE_FILE_MACHINE_AMD64 => Architecture::X86_64,
            _ => Architecture::Unknown,
        }
    }

    #[inline]
    fn is_64(&self) -> bool {
        self.is_64
    }

    #[inline]
    fn is_little_endian(&self) -> bool {
        true
    }

    fn kind(&self) -> ObjectKind {
        if !self.is_image {
            ObjectKind::Relocatable
        } else if self.characteristics & pe::IMAGE_FILE_DLL != 0 {
            ObjectKind::Dynamic
        } else {
            ObjectKind::Executable
        }
    }

    #[inline]
    fn section_count(&self) -> usize {
        self.sections.count
    }

    fn section_name<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        self.section_header(data, index)?
            .name(self.symbols.strings(data))
    }

    fn section_info(&self, data: &[u8], index: SectionIndex) -> Result<SectionInfo> {
        let section = self.section_header(data, index)?;
        let name = section.name(self.symbols.strings(data)).unwrap_or(&[]);
        Ok(SectionInfo {
            address: self.section_address(section),
            size: section.size(self.is_image),
            align: section.alignment(),
            file_range: section.file_range(self.is_image),
            kind: section.kind(name),
            is_text: section.is_text(),
            is_data: section.is_data(),
            is_bss: section.is_bss(),
        })
    }

    fn section_data<'data>(&self, data: &'data [u8], index: SectionIndex) -> Result<&'data [u8]> {
        match self.section_header(data, index)?.file_range(self.is_image) {
            Some((offset, size)) => DataRange::new(offset, size)
                .bytes(data)
                .read_error("Invalid COFF section offset or size"),
            None => Ok(&[]),
        }
    }

    fn relocation_count(&self, data: &[u8], section: SectionIndex) -> Result<usize> {
        let header = self.section_header(data, section)?;
        let (table, skip) = self.relocation_table(data, header)?;
        Ok(table.count - skip)
    }

    fn relocation(
        &self,
        data: &[u8],
        section: SectionIndex,
        index: usize,
    ) -> Result<RelocationInfo> {
        let header = self.section_header(data, section)?;
        let (table, skip) = self.relocation_table(data, header)?;
        let relocation = table
            .get::<pe::ImageRelocation>(data, index + skip)
            .read_error("Invalid COFF relocation index")?;

        // Relocation addresses include the section address for images.
        let offset = u64::from(
            relocation
                .virtual_address
                .get(LE)
                .wrapping_sub(header.virtual_address.get(LE)),
        );
        let symbol = SymbolIndex(relocation.symbol_table_index.get(LE) as usize);
        Ok(RelocationInfo {
            offset,
            address: self.section_address(header).wrapping_add(offset),
            r_type: relocation.typ.get(LE).into(),
            symbol: Some((SymbolTableKind::Static, symbol)),
            target: RelocationTarget::Symbol(symbol),
            addend: 0,
            implicit_addend: true,
        })
    }

    fn relocation_type_name(&self, r_type: u32) -> Option<&'static str> {
        relocation_type_name(self.machine, r_type)
    }

    fn symbol_count(&self, table: SymbolTableKind) -> usize {
        match table {
            SymbolTableKind::Static => self.symbols.symbols.count,
            SymbolTableKind::Dynamic => 0,
        }
    }

    /// Auxiliary records are skipped.
    fn symbol_stride(&self, data: &[u8], table: SymbolTableKind, index: SymbolIndex) -> usize {
        match table {
            SymbolTableKind::Static => self
                .symbols
                .symbol(data, index.0)
                .map(|symbol| 1 + usize::from(symbol.number_of_aux_symbols))
                .unwrap_or(1),
            SymbolTableKind::Dynamic => 1,
        }
    }

    fn symbol_name<'data>(
        &self,
        data: &'data [u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<&'data [u8]> {
        match table {
            SymbolTableKind::Static => self.symbols.name(data, index.0),
            SymbolTableKind::Dynamic => Err(Error::malformed("Invalid COFF symbol index")),
        }
    }

    fn symbol_info(
        &self,
        data: &[u8],
        table: SymbolTableKind,
        index: SymbolIndex,
    ) -> Result<SymbolInfo> {
        let symbol = match table {
            SymbolTableKind::Static => self.symbols.symbol(data, index.0)?,
            SymbolTableKind::Dynamic => return Err(Error::malformed("Invalid COFF symbol index")),
        };
        let section = symbol.section();
        let header = match section {
            SymbolSection::Section(index) => self.section_header(data, index).ok(),
            _ => None,
        };
        let section_name = header.map(|header| {
            header
                .name(self.symbols.strings(data))
                .unwrap_or(&[])
        });

        let value = u64::from(symbol.value());
        // The value of a common symbol is its size.
        let (address, size) = if symbol.is_common() {
            (0, value)
        } else {
            match header {
                Some(header) => (self.section_address(header).wrapping_add(value), 0),
                None => (value, 0),
            }
        };
        let file_offset = header.and_then(|header| {
            let (offset, _) = header.file_range(self.is_image)?;
            offset.checked_add(value)
        });

        Ok(SymbolInfo {
            address,
            size,
            file_offset,
            section,
            symbol_type: symbol.symbol_type(),
            flags: symbol.flags(),
            nm_char: symbol.nm_char(header.zip(section_name)),
        })
    }

    #[inline]
    fn needed_library_count(&self) -> usize {
        self.imports.len()
    }

    fn needed_library<'data>(&self, data: &'data [u8], index: usize) -> Result<&'data [u8]> {
        let offset = *self
            .imports
            .get(index)
            .read_error("Invalid PE import index")?;
        Bytes(data)
            .read_string_at(offset)
            .read_error("Invalid PE import name")
    }
}

use alloc::vec::Vec;

use crate::endian::LittleEndian as LE;
use crate::pe;
use crate::pod::Bytes;
use crate::read::{ReadError, Result};

impl pe::ImageSectionHeader {
    /// Return the file offset of the given relative virtual address,
    /// if it lies within the file data of this section.
    pub(crate) fn pe_offset_at(&self, rva: u32) -> Option<usize> {
        let delta = rva.checked_sub(self.virtual_address.get(LE))?;
        if delta >= self.size_of_raw_data.get(LE) {
            return None;
        }
        let offset = self.pointer_to_raw_data.get(LE).checked_add(delta)?;
        Some(offset as usize)
    }
}

/// Return the file offset of a relative virtual address in an image.
pub(crate) fn pe_offset_at(sections: &[pe::ImageSectionHeader], rva: u32) -> Option<usize> {
    sections.iter().find_map(|section| section.pe_offset_at(rva))
}

/// Return the file offsets of the DLL names in the import directory.
///
/// The import directory is an array of descriptors that ends with a null
/// descriptor. Each descriptor gives the address of a null terminated DLL name.
pub(crate) fn parse_import_names(
    data: &[u8],
    sections: &[pe::ImageSectionHeader],
    directory: &pe::ImageDataDirectory,
) -> Result<Vec<usize>> {
    let rva = directory.virtual_address.get(LE);
    if rva == 0 {
        return Ok(Vec::new());
    }
    let mut offset = pe_offset_at(sections, rva).read_error("Invalid PE import directory address")?;
    let mut names = Vec::new();
    loop {
        let descriptor = Bytes(data)
            .read_at::<pe::ImageImportDescriptor>(offset)
            .read_error("Missing PE null import descriptor")?;
        if descriptor.is_null() {
            break;
        }
        let name = pe_offset_at(sections, descriptor.name.get(LE))
            .read_error("Invalid PE import name address")?;
        names.push(name);
        offset += core::mem::size_of::<pe::ImageImportDescriptor>();
    }
    Ok(names)
}

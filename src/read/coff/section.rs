use core::str;

use crate::endian::LittleEndian as LE;
use crate::pe;
use crate::read::{fixed_name, Error, ReadError, Result, SectionKind, StringTable};

impl pe::ImageSectionHeader {
    /// Return the offset to the section name in the string table, if any.
    ///
    /// Long names are stored as `/123` (decimal) or `//ABCDEF` (base 64).
    pub(crate) fn name_offset(&self) -> Result<Option<u32>> {
        let bytes = fixed_name(&self.name);
        match bytes {
            [b'/', b'/', digits @ ..] => {
                let mut offset = 0u64;
                for &byte in digits {
                    let digit = match byte {
                        b'A'..=b'Z' => byte - b'A',
                        b'a'..=b'z' => byte - b'a' + 26,
                        b'0'..=b'9' => byte - b'0' + 52,
                        b'+' => 62,
                        b'/' => 63,
                        _ => return Err(Error::malformed("Invalid COFF section name base-64 offset")),
                    };
                    offset = offset * 64 + u64::from(digit);
                }
                if offset > u64::from(u32::MAX) {
                    return Err(Error::malformed("Invalid COFF section name base-64 offset"));
                }
                Ok(Some(offset as u32))
            }
            [b'/', digits @ ..] => str::from_utf8(digits)
                .ok()
                .and_then(|digits| digits.parse::<u32>().ok())
                .read_error("Invalid COFF section name offset")
                .map(Some),
            _ => Ok(None),
        }
    }

    /// Return the section name, looking up long names in the string table.
    pub(crate) fn name<'data>(&'data self, strings: StringTable<'data>) -> Result<&'data [u8]> {
        match self.name_offset()? {
            Some(offset) => strings
                .get(offset)
                .read_error("Invalid COFF section name offset"),
            None => Ok(fixed_name(&self.name)),
        }
    }

    #[inline]
    pub(crate) fn characteristics(&self) -> u32 {
        self.characteristics.get(LE)
    }

    /// The offset and size of the section data in the file.
    ///
    /// Returns `None` for uninitialized data and sections without file data.
    /// `virtual_size` limits the size of image sections, which are padded to
    /// the file alignment.
    pub(crate) fn file_range(&self, is_image: bool) -> Option<(u64, u64)> {
        let offset = self.pointer_to_raw_data.get(LE);
        if offset == 0 || self.characteristics() & pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA != 0 {
            return None;
        }
        let mut size = self.size_of_raw_data.get(LE);
        let virtual_size = self.virtual_size.get(LE);
        if is_image && virtual_size != 0 {
            size = size.min(virtual_size);
        }
        Some((u64::from(offset), u64::from(size)))
    }

    /// The size of the section in memory.
    pub(crate) fn size(&self, is_image: bool) -> u64 {
        let raw_size = self.size_of_raw_data.get(LE);
        let virtual_size = self.virtual_size.get(LE);
        if !is_image {
            u64::from(raw_size)
        } else if raw_size == 0 {
            u64::from(virtual_size)
        } else {
            u64::from(raw_size.min(virtual_size))
        }
    }

    /// The alignment in bytes, from the `IMAGE_SCN_ALIGN_*` characteristics.
    ///
    /// Defaults to 16 bytes if no alignment is given.
    pub(crate) fn alignment(&self) -> u64 {
        match (self.characteristics() & pe::IMAGE_SCN_ALIGN_MASK) >> 20 {
            0 => 16,
            shift => 1 << (shift - 1),
        }
    }

    pub(crate) fn is_text(&self) -> bool {
        self.characteristics() & pe::IMAGE_SCN_CNT_CODE != 0
    }

    pub(crate) fn is_data(&self) -> bool {
        self.characteristics() & pe::IMAGE_SCN_CNT_INITIALIZED_DATA != 0
    }

    pub(crate) fn is_bss(&self) -> bool {
        self.characteristics() & pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA != 0
    }

    /// Classify the section. `name` is used to recognize debugging sections.
    pub(crate) fn kind(&self, name: &[u8]) -> SectionKind {
        let characteristics = self.characteristics();
        if characteristics & pe::IMAGE_SCN_CNT_CODE != 0 {
            SectionKind::Text
        } else if characteristics & pe::IMAGE_SCN_CNT_INITIALIZED_DATA != 0 {
            if characteristics & pe::IMAGE_SCN_MEM_DISCARDABLE != 0 && name.starts_with(b".debug")
            {
                SectionKind::Debug
            } else if characteristics & pe::IMAGE_SCN_MEM_WRITE != 0 {
                SectionKind::Data
            } else {
                SectionKind::ReadOnlyData
            }
        } else if characteristics & pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA != 0 {
            SectionKind::UninitializedData
        } else if characteristics & pe::IMAGE_SCN_LNK_INFO != 0 {
            SectionKind::Linker
        } else {
            SectionKind::Unknown
        }
    }

    /// The number of relocations, and whether the count is stored in the first entry.
    pub(crate) fn relocation_count(&self) -> (usize, bool) {
        let count = self.number_of_relocations.get(LE);
        if count == u16::MAX && self.characteristics() & pe::IMAGE_SCN_LNK_NRELOC_OVFL != 0 {
            (0, true)
        } else {
            (count.into(), false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::U32;

    fn header(name: &[u8; 8], characteristics: u32) -> pe::ImageSectionHeader {
        pe::ImageSectionHeader {
            name: *name,
            characteristics: U32::from_bytes(characteristics.to_le_bytes()),
            ..Default::default()
        }
    }

    #[test]
    fn long_names() {
        let strings = StringTable::new(b"\0\0\0\0.debug_abbrev\0");
        assert_eq!(header(b".text\0\0\0", 0).name(strings), Ok(&b".text"[..]));
        assert_eq!(
            header(b"/4\0\0\0\0\0\0", 0).name(strings),
            Ok(&b".debug_abbrev"[..])
        );
        assert_eq!(header(b"//AAAAAE", 0).name_offset(), Ok(Some(4)));
        assert!(header(b"/x\0\0\0\0\0\0", 0).name_offset().is_err());
    }

    #[test]
    fn classify() {
        let text = header(
            b".text\0\0\0",
            pe::IMAGE_SCN_CNT_CODE | pe::IMAGE_SCN_MEM_EXECUTE | pe::IMAGE_SCN_ALIGN_16BYTES,
        );
        assert_eq!(text.kind(b".text"), SectionKind::Text);
        assert!(text.is_text() && !text.is_data() && !text.is_bss());
        assert_eq!(text.alignment(), 16);

        let bss = header(b".bss\0\0\0\0", pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA);
        assert_eq!(bss.kind(b".bss"), SectionKind::UninitializedData);
        assert!(bss.is_bss());
        assert_eq!(bss.file_range(false), None);

        let one = header(b".data\0\0\0", pe::IMAGE_SCN_ALIGN_1BYTES);
        assert_eq!(one.alignment(), 1);
        assert_eq!(header(b".x\0\0\0\0\0\0", pe::IMAGE_SCN_ALIGN_8192BYTES).alignment(), 8192);
    }
}

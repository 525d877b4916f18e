use crate::elf;
use crate::endian::{BigEndian, U64};
use crate::pod::Bytes;
use crate::read::{CompressedData, CompressionFormat, ReadError, Result};

use super::{CompressionHeader, FileHeader, SectionHeader};

/// Return the compressed data of an `SHF_COMPRESSED` section.
///
/// Returns `Ok(None)` if the section is not compressed this way.
pub(crate) fn compressed_data<'data, Elf: FileHeader>(
    endian: Elf::Endian,
    section: &Elf::SectionHeader,
    section_data: &'data [u8],
) -> Result<Option<CompressedData<'data>>> {
    if !section.has_flag(endian, elf::SHF_COMPRESSED) {
        return Ok(None);
    }
    let mut bytes = Bytes(section_data);
    let header = bytes
        .read::<Elf::CompressionHeader>()
        .read_error("Invalid ELF compressed section header")?;
    let format = match header.ch_type(endian) {
        elf::ELFCOMPRESS_ZLIB => CompressionFormat::Zlib,
        elf::ELFCOMPRESS_ZSTD => CompressionFormat::Zstandard,
        _ => CompressionFormat::Unknown,
    };
    Ok(Some(CompressedData {
        format,
        data: bytes.0,
        uncompressed_size: header.ch_size(endian).into(),
    }))
}

/// Return the compressed data of a GNU style `.zdebug_*` section.
///
/// These start with `ZLIB` followed by the big endian uncompressed size.
/// Returns `Ok(None)` for other sections.
pub(crate) fn gnu_compressed_data<'data>(
    name: &[u8],
    section_data: &'data [u8],
) -> Result<Option<CompressedData<'data>>> {
    if !name.starts_with(b".zdebug_") {
        return Ok(None);
    }
    let mut bytes = Bytes(section_data);
    if bytes.read_bytes(4).map(|magic| magic.0) != Some(&b"ZLIB"[..]) {
        return Ok(None);
    }
    let uncompressed_size = bytes
        .read::<U64<BigEndian>>()
        .read_error("GNU compressed section is too short")?
        .get(BigEndian);
    Ok(Some(CompressedData {
        format: CompressionFormat::Zlib,
        data: bytes.0,
        uncompressed_size,
    }))
}

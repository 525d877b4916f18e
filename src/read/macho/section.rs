use core::fmt::Debug;

use crate::endian;
use crate::macho;
use crate::pod::Pod;
use crate::read::{fixed_name, SectionKind};

/// A trait for generic access to [`macho::SegmentCommand32`] and [`macho::SegmentCommand64`].
#[allow(missing_docs)]
pub trait Segment: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;
    type Section: Section<Endian = Self::Endian, Word = Self::Word>;

    /// The load command type of this segment.
    const CMD: u32;

    fn segname(&self) -> &[u8; 16];
    fn vmaddr(&self, endian: Self::Endian) -> Self::Word;
    fn nsects(&self, endian: Self::Endian) -> u32;
}

macro_rules! impl_segment {
    ($segment:ident, $section:ident, $word:ty, $cmd:path) => {
        impl<Endian: endian::Endian> Segment for macho::$segment<Endian> {
            type Word = $word;
            type Endian = Endian;
            type Section = macho::$section<Endian>;

            const CMD: u32 = $cmd;

            fn segname(&self) -> &[u8; 16] {
                &self.segname
            }

            field_getters! {
                vmaddr: $word,
                nsects: u32,
            }
        }
    };
}

impl_segment!(SegmentCommand32, Section32, u32, macho::LC_SEGMENT);
impl_segment!(SegmentCommand64, Section64, u64, macho::LC_SEGMENT_64);

/// A trait for generic access to [`macho::Section32`] and [`macho::Section64`].
#[allow(missing_docs)]
pub trait Section: Debug + Pod {
    type Word: Into<u64>;
    type Endian: endian::Endian;

    fn sectname(&self) -> &[u8; 16];
    fn segname(&self) -> &[u8; 16];
    fn addr(&self, endian: Self::Endian) -> Self::Word;
    fn size(&self, endian: Self::Endian) -> Self::Word;
    fn offset(&self, endian: Self::Endian) -> u32;
    fn align(&self, endian: Self::Endian) -> u32;
    fn reloff(&self, endian: Self::Endian) -> u32;
    fn nreloc(&self, endian: Self::Endian) -> u32;
    fn flags(&self, endian: Self::Endian) -> u32;

    /// Return the `sectname` bytes up until the null terminator.
    fn name(&self) -> &[u8] {
        fixed_name(self.sectname())
    }

    /// Return the `segname` bytes up until the null terminator.
    fn segment_name(&self) -> &[u8] {
        fixed_name(self.segname())
    }

    fn section_type(&self, endian: Self::Endian) -> u32 {
        self.flags(endian) & macho::SECTION_TYPE
    }

    /// Return true if the section is zero filled when loaded.
    fn is_zerofill(&self, endian: Self::Endian) -> bool {
        matches!(
            self.section_type(endian),
            macho::S_ZEROFILL | macho::S_GB_ZEROFILL | macho::S_THREAD_LOCAL_ZEROFILL
        )
    }

    /// Return the offset and size of the section in the file.
    ///
    /// Returns `None` for zerofill sections.
    fn file_range(&self, endian: Self::Endian) -> Option<(u64, u64)> {
        if self.is_zerofill(endian) {
            None
        } else {
            Some((self.offset(endian).into(), self.size(endian).into()))
        }
    }

    /// The alignment in bytes. `align` is stored as a power of two.
    fn alignment(&self, endian: Self::Endian) -> u64 {
        1u64.checked_shl(self.align(endian)).unwrap_or(0)
    }

    fn is_text(&self, endian: Self::Endian) -> bool {
        self.flags(endian) & macho::S_ATTR_PURE_INSTRUCTIONS != 0
    }

    fn is_data(&self, endian: Self::Endian) -> bool {
        !self.is_text(endian)
            && !matches!(
                self.section_type(endian),
                macho::S_ZEROFILL | macho::S_GB_ZEROFILL
            )
    }

    fn is_bss(&self, endian: Self::Endian) -> bool {
        !self.is_text(endian)
            && matches!(
                self.section_type(endian),
                macho::S_ZEROFILL | macho::S_GB_ZEROFILL
            )
    }

    fn is_thread_local(&self, endian: Self::Endian) -> bool {
        matches!(
            self.section_type(endian),
            macho::S_THREAD_LOCAL_REGULAR
                | macho::S_THREAD_LOCAL_ZEROFILL
                | macho::S_THREAD_LOCAL_VARIABLES
                | macho::S_THREAD_LOCAL_VARIABLE_POINTERS
                | macho::S_THREAD_LOCAL_INIT_FUNCTION_POINTERS
        )
    }

    fn kind(&self, endian: Self::Endian) -> SectionKind {
        let flags = self.flags(endian);
        if self.is_text(endian) || flags & macho::S_ATTR_SOME_INSTRUCTIONS != 0 {
            return SectionKind::Text;
        }
        if flags & macho::S_ATTR_DEBUG != 0 || self.segment_name() == b"__DWARF" {
            return SectionKind::Debug;
        }
        match self.section_type(endian) {
            macho::S_ZEROFILL | macho::S_GB_ZEROFILL => return SectionKind::UninitializedData,
            macho::S_THREAD_LOCAL_ZEROFILL => return SectionKind::UninitializedTls,
            macho::S_THREAD_LOCAL_REGULAR => return SectionKind::Tls,
            macho::S_CSTRING_LITERALS => return SectionKind::ReadOnlyString,
            _ => {}
        }
        match (self.segment_name(), self.name()) {
            (b"__TEXT", _) => SectionKind::ReadOnlyData,
            (b"__DATA", b"__const") | (b"__DATA_CONST", _) => SectionKind::ReadOnlyData,
            (b"__DATA", _) => SectionKind::Data,
            (b"__LINKEDIT", _) => SectionKind::Linker,
            _ => SectionKind::Unknown,
        }
    }
}

macro_rules! impl_section {
    ($section:ident, $word:ty) => {
        impl<Endian: endian::Endian> Section for macho::$section<Endian> {
            type Word = $word;
            type Endian = Endian;

            fn sectname(&self) -> &[u8; 16] {
                &self.sectname
            }

            fn segname(&self) -> &[u8; 16] {
                &self.segname
            }

            field_getters! {
                addr: $word,
                size: $word,
                offset: u32,
                align: u32,
                reloff: u32,
                nreloc: u32,
                flags: u32,
            }
        }
    };
}

impl_section!(Section32, u32);
impl_section!(Section64, u64);

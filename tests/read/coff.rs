use objinspect::{
    Architecture, BinaryFormat, ObjectFile, ObjectKind, RelocationTarget, SectionIndex,
    SectionKind, SymbolFlags, SymbolIndex, SymbolSection, SymbolType,
};

use crate::fixtures;

#[test]
fn object_header() {
    let file = ObjectFile::create(fixtures::coff_object()).unwrap();
    assert_eq!(file.format(), BinaryFormat::Coff);
    assert_eq!(file.architecture(), Architecture::X86_64);
    assert_eq!(file.kind(), ObjectKind::Relocatable);
    assert!(file.is_64());
    assert!(file.is_little_endian());
    assert!(file.needed_libraries().is_at_end());
    assert!(file.dynamic_symbols().is_at_end());
}

#[test]
fn object_sections() {
    let file = ObjectFile::create(fixtures::coff_object()).unwrap();
    let sections = file
        .sections()
        .map(|section| {
            (
                section.name().unwrap(),
                section.kind().unwrap(),
                section.size().unwrap(),
                section.alignment().unwrap(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        sections,
        [
            (".text", SectionKind::Text, 16, 16),
            (".bss", SectionKind::UninitializedData, 8, 16),
            (".debug_abbrev", SectionKind::Debug, 4, 1),
        ]
    );

    let mut sections = file.sections();
    assert_eq!(sections.address(), Ok(0));
    assert_eq!(sections.contents().unwrap()[..2], [0xe8, 0]);
    sections.move_next().unwrap();
    assert_eq!(sections.is_bss(), Ok(true));
    assert_eq!(sections.contents(), Ok(&[][..]));
    sections.move_next().unwrap();
    assert_eq!(sections.contents(), Ok(&[1, 2, 3, 4][..]));
    assert_eq!(sections.is_data(), Ok(true));
}

#[test]
fn object_symbols() {
    let file = ObjectFile::create(fixtures::coff_object()).unwrap();
    let symbols = file
        .symbols()
        .map(|symbol| {
            (
                symbol.index().0,
                symbol.name().unwrap(),
                symbol.nm_type_char().unwrap(),
                symbol.symbol_type().unwrap(),
            )
        })
        .collect::<Vec<_>>();
    // Auxiliary records are skipped.
    assert_eq!(
        symbols,
        [
            (0, "test.c", 'n', SymbolType::File),
            (2, ".text", 't', SymbolType::Debug),
            (4, "main", 'T', SymbolType::Function),
            (5, "puts", 'U', SymbolType::Unknown),
            (6, "a_very_long_symbol", 'C', SymbolType::Data),
            (7, "counter", 'b', SymbolType::Data),
        ]
    );
}

#[test]
fn object_symbol_details() {
    let file = ObjectFile::create(fixtures::coff_object()).unwrap();
    let text = file.sections().next().unwrap();
    let (text_offset, _) = text.file_range().unwrap().unwrap();

    let main = file.symbols().nth(2).unwrap();
    assert_eq!(main.name(), Ok("main"));
    assert_eq!(main.address(), Ok(0));
    assert_eq!(main.file_offset(), Ok(Some(text_offset)));
    assert_eq!(main.section(), Ok(SymbolSection::Section(SectionIndex(0))));
    assert!(main.is_global().unwrap());
    assert_eq!(text.contains_symbol(&main), Ok(true));

    let common = file.symbols().nth(4).unwrap();
    assert_eq!(common.section(), Ok(SymbolSection::Common));
    assert_eq!(common.address(), Ok(0));
    assert_eq!(common.size(), Ok(8));
    assert!(common.flags().unwrap().contains(SymbolFlags::COMMON));

    let counter = file.symbols().nth(5).unwrap();
    assert_eq!(counter.address(), Ok(4));
    assert_eq!(counter.section(), Ok(SymbolSection::Section(SectionIndex(1))));
    assert!(!counter.is_global().unwrap());
    assert_eq!(text.contains_symbol(&counter), Ok(false));
}

#[test]
fn object_relocations() {
    let file = ObjectFile::create(fixtures::coff_object()).unwrap();
    let mut sections = file.sections();
    let mut relocations = sections.relocations().unwrap();
    assert_eq!(relocations.offset(), Ok(1));
    assert_eq!(relocations.address(), Ok(1));
    assert_eq!(relocations.relocation_type(), Ok(4));
    assert_eq!(relocations.type_name().unwrap(), "IMAGE_REL_AMD64_REL32");
    assert_eq!(relocations.has_implicit_addend(), Ok(true));
    assert_eq!(
        relocations.current().unwrap().target(),
        Ok(RelocationTarget::Symbol(SymbolIndex(5)))
    );
    assert_eq!(relocations.value_string().unwrap(), "puts");
    assert_eq!(relocations.symbol().unwrap().name(), Ok("puts"));
    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());

    sections.move_next().unwrap();
    assert!(sections.relocations().unwrap().is_at_end());
}

#[test]
fn image() {
    let file = ObjectFile::create(fixtures::pe64_executable()).unwrap();
    assert_eq!(file.format(), BinaryFormat::Pe);
    assert_eq!(file.architecture(), Architecture::X86_64);
    assert_eq!(file.kind(), ObjectKind::Executable);
    assert!(file.is_64());

    let mut sections = file.sections();
    assert_eq!(sections.name(), Ok(".rdata"));
    assert_eq!(sections.address(), Ok(0x1_4000_1000));
    // Image sections are limited to their virtual size.
    assert_eq!(sections.size(), Ok(0x100));
    assert_eq!(sections.contents().unwrap().len(), 0x100);
    assert_eq!(
        sections.current().unwrap().kind(),
        Ok(SectionKind::ReadOnlyData)
    );
    assert!(sections.relocations().unwrap().is_at_end());
    sections.move_next().unwrap();
    assert!(sections.is_at_end());

    assert!(file.symbols().is_at_end());

    let libraries = file
        .needed_libraries()
        .map(|library| library.path().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(libraries, ["KERNEL32.dll", "msvcrt.dll"]);
}

#[test]
fn image_bad_signature() {
    let mut data = fixtures::pe64_executable();
    data[0x40] = b'X';
    let error = ObjectFile::create(data).unwrap_err();
    assert_eq!(error.kind(), objinspect::ErrorKind::Malformed);
}

use objinspect::{
    Architecture, BinaryFormat, ObjectFile, ObjectKind, RelocationTarget, SectionIndex,
    SectionKind, SymbolFlags, SymbolSection, SymbolType,
};

use crate::fixtures;

#[test]
fn header() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    assert_eq!(file.format(), BinaryFormat::MachO);
    assert_eq!(file.architecture(), Architecture::X86_64);
    assert_eq!(file.kind(), ObjectKind::Relocatable);
    assert!(file.is_64());
    assert!(file.is_little_endian());
}

#[test]
fn sections() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    let mut sections = file.sections();
    assert_eq!(sections.name(), Ok("__text"));
    assert_eq!(sections.address(), Ok(0));
    assert_eq!(sections.size(), Ok(16));
    assert_eq!(sections.alignment(), Ok(16));
    assert_eq!(sections.is_text(), Ok(true));
    assert_eq!(sections.contents().unwrap()[0], 0xe8);
    assert_eq!(sections.current().unwrap().kind(), Ok(SectionKind::Text));

    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok("__bss"));
    assert_eq!(sections.address(), Ok(0x10));
    assert_eq!(sections.size(), Ok(0x20));
    assert_eq!(sections.alignment(), Ok(8));
    assert_eq!(sections.is_bss(), Ok(true));
    assert_eq!(sections.is_data(), Ok(false));
    assert_eq!(sections.contents(), Ok(&[][..]));
    assert_eq!(
        sections.current().unwrap().kind(),
        Ok(SectionKind::UninitializedData)
    );

    sections.move_next().unwrap();
    assert!(sections.is_at_end());
}

#[test]
fn symbols() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    let symbols = file
        .symbols()
        .map(|symbol| {
            (
                symbol.name().unwrap(),
                symbol.nm_type_char().unwrap(),
                symbol.symbol_type().unwrap(),
                symbol.section().unwrap(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        symbols,
        [
            (
                "_main",
                'T',
                SymbolType::Function,
                SymbolSection::Section(SectionIndex(0))
            ),
            ("_printf", 'U', SymbolType::Unknown, SymbolSection::Undefined),
            ("_buf", 'C', SymbolType::Data, SymbolSection::Common),
            (
                "_local",
                'b',
                SymbolType::Data,
                SymbolSection::Section(SectionIndex(1))
            ),
        ]
    );
}

#[test]
fn symbol_details() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    let text = file.sections().next().unwrap();
    let (text_offset, text_size) = text.file_range().unwrap().unwrap();
    assert_eq!(text_size, 16);

    let mut symbols = file.symbols();
    assert_eq!(symbols.file_offset(), Ok(Some(text_offset)));
    assert!(symbols.flags().unwrap().contains(SymbolFlags::GLOBAL));

    symbols.move_next().unwrap();
    assert!(symbols.flags().unwrap().contains(SymbolFlags::UNDEFINED));

    // The value of a common symbol is its size.
    symbols.move_next().unwrap();
    assert_eq!(symbols.name(), Ok("_buf"));
    assert_eq!(symbols.address(), Ok(0));
    assert_eq!(symbols.size(), Ok(32));
    assert!(symbols.flags().unwrap().contains(SymbolFlags::COMMON));

    // Zero filled sections have no file data.
    symbols.move_next().unwrap();
    assert_eq!(symbols.name(), Ok("_local"));
    assert_eq!(symbols.address(), Ok(0x14));
    assert_eq!(symbols.file_offset(), Ok(None));
    assert!(!symbols.flags().unwrap().contains(SymbolFlags::GLOBAL));
}

#[test]
fn relocations() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    let sections = file.sections();
    let mut relocations = sections.relocations().unwrap();

    assert_eq!(relocations.offset(), Ok(1));
    assert_eq!(relocations.address(), Ok(1));
    assert_eq!(relocations.type_name().unwrap(), "X86_64_RELOC_BRANCH");
    assert_eq!(relocations.has_implicit_addend(), Ok(true));
    assert_eq!(relocations.addend(), Ok(0));
    assert_eq!(relocations.value_string().unwrap(), "_printf");
    let symbol = relocations.symbol().unwrap();
    assert_eq!(symbol.name(), Ok("_printf"));

    relocations.move_next().unwrap();
    assert_eq!(relocations.offset(), Ok(8));
    assert_eq!(relocations.type_name().unwrap(), "X86_64_RELOC_UNSIGNED");
    assert_eq!(
        relocations.current().unwrap().target(),
        Ok(RelocationTarget::Section(SectionIndex(1)))
    );
    assert_eq!(relocations.value_string().unwrap(), "__bss");
    assert!(relocations.symbol().unwrap().is_at_end());

    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());
    assert!(relocations.move_next().is_err());

    let bss = file.sections().nth(1).unwrap();
    assert!(bss.relocations().unwrap().is_at_end());
}

#[test]
fn needed_libraries() {
    let file = ObjectFile::create(fixtures::macho64_object()).unwrap();
    let mut libraries = file.needed_libraries();
    assert_eq!(libraries.path(), Ok("/usr/lib/libSystem.B.dylib"));
    libraries.move_next().unwrap();
    assert_eq!(libraries.path(), Ok("/usr/lib/libz.1.dylib"));
    libraries.move_next().unwrap();
    assert!(libraries.is_at_end());
}

fn check_object32(big_endian: bool, architecture: Architecture, type_names: [&str; 2]) {
    let file = ObjectFile::create(fixtures::macho32_object(big_endian)).unwrap();
    assert_eq!(file.format(), BinaryFormat::MachO);
    assert_eq!(file.architecture(), architecture);
    assert_eq!(file.kind(), ObjectKind::Relocatable);
    assert!(!file.is_64());
    assert_eq!(file.is_little_endian(), !big_endian);

    let mut sections = file.sections();
    assert_eq!(sections.name(), Ok("__text"));
    assert_eq!(sections.size(), Ok(8));
    assert_eq!(sections.alignment(), Ok(4));
    assert_eq!(sections.is_text(), Ok(true));
    assert_eq!(sections.contents(), Ok(&[0; 8][..]));

    let symbols = file
        .symbols()
        .map(|symbol| (symbol.name().unwrap(), symbol.nm_type_char().unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(symbols, [("_start", 'T'), ("_extern", 'U')]);

    let mut relocations = sections.relocations().unwrap();
    assert_eq!(relocations.offset(), Ok(0));
    assert_eq!(relocations.type_name().unwrap(), type_names[0]);
    assert_eq!(relocations.value_string().unwrap(), "_extern");
    assert_eq!(relocations.symbol().unwrap().name(), Ok("_extern"));

    // Scattered relocations refer to an address rather than a symbol.
    relocations.move_next().unwrap();
    assert_eq!(relocations.offset(), Ok(4));
    assert_eq!(relocations.address(), Ok(4));
    assert_eq!(relocations.type_name().unwrap(), type_names[1]);
    assert_eq!(
        relocations.current().unwrap().target(),
        Ok(RelocationTarget::Address(0x1234))
    );
    assert_eq!(relocations.value_string().unwrap(), "0x1234");
    assert!(relocations.symbol().unwrap().is_at_end());

    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());

    sections.move_next().unwrap();
    assert!(sections.is_at_end());
}

#[test]
fn object32_little_endian() {
    check_object32(
        false,
        Architecture::I386,
        ["GENERIC_RELOC_VANILLA", "GENERIC_RELOC_SECTDIFF"],
    );
}

#[test]
fn object32_big_endian() {
    check_object32(
        true,
        Architecture::PowerPc,
        ["PPC_RELOC_VANILLA", "PPC_RELOC_SECTDIFF"],
    );
}

#[test]
fn truncated() {
    let data = fixtures::macho64_object();
    // The load commands extend past the end of the data.
    let error = ObjectFile::create(&data[..100]).unwrap_err();
    assert_eq!(error.kind(), objinspect::ErrorKind::Malformed);
}

use objinspect::{
    Architecture, BinaryFormat, ObjectFile, ObjectKind, RelocationTarget, SectionIndex,
    SectionKind, SymbolIndex, SymbolSection, SymbolTableKind, SymbolType,
};

use crate::fixtures;

#[test]
fn executable_header() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    assert_eq!(file.format(), BinaryFormat::Elf);
    assert_eq!(file.architecture(), Architecture::X86_64);
    assert_eq!(file.kind(), ObjectKind::Executable);
    assert!(file.is_64());
    assert!(file.is_little_endian());
}

#[test]
fn executable_sections() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let names = file
        .sections()
        .map(|section| section.name().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "",
            ".text",
            ".rela.text",
            ".symtab",
            ".strtab",
            ".dynstr",
            ".dynamic",
            ".shstrtab"
        ]
    );

    let text = file.sections().nth(1).unwrap();
    assert_eq!(text.index(), SectionIndex(1));
    assert_eq!(text.address(), Ok(0x1000));
    assert_eq!(text.size(), Ok(16));
    assert_eq!(text.alignment(), Ok(16));
    assert_eq!(text.kind(), Ok(SectionKind::Text));
    assert_eq!(text.contents(), Ok(&[0x90; 16][..]));
    assert_eq!(text.is_text(), Ok(true));
    assert_eq!(text.is_data(), Ok(false));
    assert_eq!(text.is_bss(), Ok(false));
}

#[test]
fn executable_symbols() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let text = file.sections().nth(1).unwrap();
    let (text_offset, _) = text.file_range().unwrap().unwrap();

    let mut symbols = file.symbols();
    assert_eq!(symbols.index(), Ok(SymbolIndex(1)));
    assert_eq!(symbols.name(), Ok("main"));
    assert_eq!(symbols.address(), Ok(0x1000));
    assert_eq!(symbols.size(), Ok(16));
    assert_eq!(symbols.file_offset(), Ok(Some(text_offset)));
    assert_eq!(symbols.symbol_type(), Ok(SymbolType::Function));
    assert_eq!(symbols.nm_type_char(), Ok('T'));
    assert_eq!(symbols.section(), Ok(SymbolSection::Section(SectionIndex(1))));

    symbols.move_next().unwrap();
    assert_eq!(symbols.name(), Ok("puts"));
    assert_eq!(symbols.nm_type_char(), Ok('U'));
    assert_eq!(symbols.section(), Ok(SymbolSection::Undefined));
    assert_eq!(symbols.file_offset(), Ok(None));
    assert!(symbols.current().unwrap().is_undefined().unwrap());

    symbols.move_next().unwrap();
    assert!(symbols.is_at_end());

    assert!(file.dynamic_symbols().is_at_end());
}

#[test]
fn executable_relocations() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let mut sections = file.sections();
    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok(".text"));

    let mut relocations = sections.relocations().unwrap();
    assert_eq!(relocations.section_index(), SectionIndex(1));
    assert_eq!(relocations.address(), Ok(0x1004));
    assert_eq!(relocations.offset(), Ok(4));
    assert_eq!(relocations.relocation_type(), Ok(4));
    assert_eq!(relocations.type_name().unwrap(), "R_X86_64_PLT32");
    assert_eq!(relocations.addend(), Ok(-4));
    assert_eq!(relocations.has_implicit_addend(), Ok(false));
    assert_eq!(relocations.value_string().unwrap(), "puts-0x4");
    assert_eq!(relocations.symbol().unwrap().name(), Ok("puts"));

    relocations.move_next().unwrap();
    assert_eq!(relocations.offset(), Ok(8));
    assert_eq!(relocations.type_name().unwrap(), "R_X86_64_64");
    assert_eq!(relocations.value_string().unwrap(), "main+0x10");

    relocations.move_next().unwrap();
    assert_eq!(relocations.offset(), Ok(0xc));
    assert_eq!(relocations.type_name().unwrap(), "R_X86_64_RELATIVE");
    assert_eq!(relocations.value_string().unwrap(), "*ABS*");
    assert!(relocations.symbol().unwrap().is_at_end());

    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());

    // Relocation sections have no relocations of their own.
    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok(".rela.text"));
    assert!(sections.relocations().unwrap().is_at_end());
}

#[test]
fn executable_needed_libraries() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let libraries = file
        .needed_libraries()
        .map(|library| library.path().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(libraries, ["libc.so.6", "libm.so.6"]);
}

#[test]
fn shared_object_dynamic_symbols() {
    let file = ObjectFile::create(fixtures::elf64_shared_object()).unwrap();
    assert_eq!(file.kind(), ObjectKind::Dynamic);
    assert!(file.symbols().is_at_end());

    let mut symbols = file.dynamic_symbols();
    assert_eq!(symbols.table(), SymbolTableKind::Dynamic);
    assert_eq!(symbols.index(), Ok(SymbolIndex(1)));
    assert_eq!(symbols.name(), Ok("foo"));
    assert_eq!(symbols.nm_type_char(), Ok('U'));
    symbols.move_next().unwrap();
    assert_eq!(symbols.name(), Ok("bar"));
    assert_eq!(symbols.address(), Ok(0x1000));
    assert_eq!(symbols.nm_type_char(), Ok('T'));
    assert_eq!(symbols.section(), Ok(SymbolSection::Section(SectionIndex(1))));
    symbols.move_next().unwrap();
    assert!(symbols.is_at_end());

    let libraries = file
        .needed_libraries()
        .map(|library| library.path().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(libraries, ["libc.so.6"]);
}

#[test]
fn shared_object_relocations() {
    let file = ObjectFile::create(fixtures::elf64_shared_object()).unwrap();
    let got_plt = file.sections().nth(5).unwrap();
    assert_eq!(got_plt.name(), Ok(".got.plt"));

    // The symbol table comes from the `sh_link` of `.rela.plt`.
    let mut relocations = got_plt.relocations().unwrap();
    assert_eq!(relocations.address(), Ok(0x2008));
    assert_eq!(relocations.offset(), Ok(8));
    assert_eq!(relocations.type_name().unwrap(), "R_X86_64_JUMP_SLOT");
    assert_eq!(relocations.value_string().unwrap(), "foo");
    let symbol = relocations.symbol().unwrap();
    assert_eq!(symbol.table(), SymbolTableKind::Dynamic);
    assert_eq!(symbol.name(), Ok("foo"));

    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());

    let text = file.sections().nth(1).unwrap();
    assert!(text.relocations().unwrap().is_at_end());
}

fn check_relocatable(data: Vec<u8>, architecture: Architecture, little_endian: bool) {
    let file = ObjectFile::create(data).unwrap();
    assert_eq!(file.format(), BinaryFormat::Elf);
    assert_eq!(file.architecture(), architecture);
    assert_eq!(file.kind(), ObjectKind::Relocatable);
    assert!(!file.is_64());
    assert_eq!(file.is_little_endian(), little_endian);

    let mut sections = file.sections();
    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok(".text"));
    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok(".data"));
    assert_eq!(sections.contents(), Ok(&[1, 2, 3, 4, 5, 6, 7, 8][..]));
    assert_eq!(sections.is_data(), Ok(true));
    sections.move_next().unwrap();
    assert_eq!(sections.name(), Ok(".bss"));
    assert_eq!(sections.size(), Ok(16));
    assert_eq!(sections.contents(), Ok(&[][..]));
    assert_eq!(sections.is_bss(), Ok(true));
    assert_eq!(sections.current().unwrap().kind(), Ok(SectionKind::UninitializedData));

    let symbols = file
        .symbols()
        .map(|symbol| {
            (
                symbol.name().unwrap(),
                symbol.nm_type_char().unwrap(),
                symbol.symbol_type().unwrap(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        symbols,
        [
            ("file.c", 'a', SymbolType::File),
            (".data", 'd', SymbolType::Debug),
            ("buffer", 'b', SymbolType::Data),
            ("counter", 'D', SymbolType::Data),
            ("start", 'T', SymbolType::Function),
            ("extern_fn", 'U', SymbolType::Unknown),
        ]
    );
}

#[test]
fn relocatable_little_endian() {
    let data = fixtures::elf32_relocatable(false);
    check_relocatable(data.clone(), Architecture::I386, true);

    let file = ObjectFile::create(data).unwrap();
    let text = file.sections().nth(1).unwrap();
    let mut relocations = text.relocations().unwrap();
    assert_eq!(relocations.offset(), Ok(1));
    assert_eq!(relocations.address(), Ok(1));
    assert_eq!(relocations.type_name().unwrap(), "R_386_32");
    assert_eq!(relocations.has_implicit_addend(), Ok(true));
    assert_eq!(
        relocations.current().unwrap().target(),
        Ok(RelocationTarget::Section(SectionIndex(2)))
    );
    assert_eq!(relocations.value_string().unwrap(), ".data");

    relocations.move_next().unwrap();
    assert_eq!(relocations.offset(), Ok(4));
    assert_eq!(relocations.type_name().unwrap(), "R_386_PC32");
    assert_eq!(relocations.value_string().unwrap(), "extern_fn");
    relocations.move_next().unwrap();
    assert!(relocations.is_at_end());
}

#[test]
fn relocatable_big_endian() {
    check_relocatable(fixtures::elf32_relocatable(true), Architecture::PowerPc, false);
}

#[test]
fn relocatable_symbol_addresses() {
    let file = ObjectFile::create(fixtures::elf32_relocatable(false)).unwrap();
    let counter = file
        .symbols()
        .find(|symbol| symbol.name() == Ok("counter"))
        .unwrap();
    // Relocatable symbol values are offsets into their section, and `.data` is at 0.
    assert_eq!(counter.address(), Ok(4));
    assert_eq!(counter.size(), Ok(4));
    assert_eq!(counter.section(), Ok(SymbolSection::Section(SectionIndex(2))));
    assert!(counter.is_global().unwrap());

    let data = file.sections().nth(2).unwrap();
    let (data_offset, _) = data.file_range().unwrap().unwrap();
    assert_eq!(counter.file_offset(), Ok(Some(data_offset + 4)));
    assert_eq!(data.contains_symbol(&counter), Ok(true));

    let bss = file.sections().nth(3).unwrap();
    assert_eq!(bss.contains_symbol(&counter), Ok(false));
}

#[cfg(feature = "compression")]
#[test]
fn compressed_sections() {
    use objinspect::CompressionFormat;

    let file = ObjectFile::create(fixtures::elf64_compressed()).unwrap();
    for section in file.sections().skip(1).take(2) {
        let name = section.name().unwrap();
        assert!(section.is_compressed().unwrap(), "{}", name);
        let compressed = section.compressed_data().unwrap();
        assert_eq!(compressed.format, CompressionFormat::Zlib);
        assert_eq!(compressed.uncompressed_size, 6);
        assert_eq!(compressed.data, fixtures::ZLIB_HELLO);
        assert_eq!(&*section.uncompressed_contents().unwrap(), b"hello\0", "{}", name);
    }

    let shstrtab = file.sections().nth(3).unwrap();
    assert_eq!(shstrtab.name(), Ok(".shstrtab"));
    assert!(!shstrtab.is_compressed().unwrap());
}

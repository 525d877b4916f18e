use objinspect::{ErrorKind, ObjectFile, SymbolType};

use crate::fixtures;

#[test]
fn unsupported_formats() {
    for data in [&[][..], &b"\x7fELF"[..], &[0u8; 64][..], &b"!<arch>\nnot an object"[..]] {
        let error = ObjectFile::create(data).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnsupportedFormat, "{:?}", data);
    }
}

#[test]
fn malformed_section_table() {
    let mut data = fixtures::elf64_executable();
    // e_shoff past the end of the data.
    data[40..48].copy_from_slice(&u64::MAX.to_le_bytes());
    let error = ObjectFile::create(data).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Malformed);
}

#[test]
fn into_inner() {
    let data = fixtures::elf64_executable();
    let file = ObjectFile::create(data.clone()).unwrap();
    assert_eq!(file.data(), &data[..]);
    assert_eq!(file.into_inner(), data);
}

#[test]
fn thread_safe() {
    fn check<T: Send + Sync>() {}
    check::<ObjectFile<Vec<u8>>>();
    check::<ObjectFile<&[u8]>>();
}

#[test]
fn section_cursor_end() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let count = file.sections().count();
    assert_eq!(count, 8);

    let mut sections = file.sections();
    for _ in 0..count {
        assert!(!sections.is_at_end());
        sections.move_next().unwrap();
    }
    assert!(sections.is_at_end());

    let error = sections.move_next().unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);
    assert!(sections.is_at_end());
    assert_eq!(sections.name().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(sections.size().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(
        sections.relocations().unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert!(sections.next().is_none());
}

#[test]
fn symbol_cursor_end() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let mut symbols = file.symbols();
    symbols.move_next().unwrap();
    symbols.move_next().unwrap();
    assert!(symbols.is_at_end());
    assert_eq!(
        symbols.move_next().unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(symbols.name().unwrap_err().kind(), ErrorKind::InvalidState);
    assert_eq!(
        symbols.nm_type_char().unwrap_err().kind(),
        ErrorKind::InvalidState
    );
}

#[test]
fn needed_library_cursor_end() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let mut libraries = file.needed_libraries();
    assert_eq!(libraries.by_ref().count(), 2);
    assert!(libraries.is_at_end());
    assert_eq!(
        libraries.move_next().unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(libraries.path().unwrap_err().kind(), ErrorKind::InvalidState);
}

#[test]
fn deterministic() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let collect = || {
        file.sections()
            .map(|section| {
                (
                    section.name().unwrap(),
                    section.address().unwrap(),
                    section.size().unwrap(),
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(collect(), collect());

    let symbols = || {
        file.symbols()
            .map(|symbol| (symbol.name().unwrap(), symbol.address().unwrap()))
            .collect::<Vec<_>>()
    };
    assert_eq!(symbols(), symbols());
}

#[test]
fn containing_section() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let symbols = file.symbols();
    assert_eq!(symbols.name(), Ok("main"));
    assert_eq!(symbols.symbol_type(), Ok(SymbolType::Function));

    let mut sections = file.sections();
    sections.move_to_containing_section(&symbols).unwrap();
    assert_eq!(sections.name(), Ok(".text"));
    assert_eq!(sections.address(), Ok(0x1000));
    assert_eq!(sections.contains_symbol(&symbols), Ok(true));

    let mut undefined = file.symbols();
    undefined.move_next().unwrap();
    assert_eq!(undefined.name(), Ok("puts"));
    assert_eq!(sections.contains_symbol(&undefined), Ok(false));
    let error = sections
        .move_to_containing_section(&undefined)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    assert!(sections.is_at_end());

    undefined.move_next().unwrap();
    let mut sections = file.sections();
    let error = sections
        .move_to_containing_section(&undefined)
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn symbol_from_other_file() {
    let first = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let second = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let symbols = second.symbols();
    let sections = first.sections();
    let error = sections.contains_symbol(&symbols).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::InvalidState);
}

#[test]
fn relocation_cursor_end() {
    let file = ObjectFile::create(fixtures::elf64_executable()).unwrap();
    let sections = file.sections();
    // The null section has no relocations.
    let mut relocations = sections.relocations().unwrap();
    assert!(relocations.is_at_end());
    assert_eq!(
        relocations.move_next().unwrap_err().kind(),
        ErrorKind::InvalidState
    );
    assert_eq!(
        relocations.value_string().unwrap_err().kind(),
        ErrorKind::InvalidState
    );

    let text = file.sections().nth(1).unwrap();
    assert_eq!(text.relocations().unwrap().count(), 3);
}

use objinspect::{ObjectFile, SectionIterator, SymbolIterator};
use std::io::{Result, Write};

/// Which parts of the file to print.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    pub headers: bool,
    pub symbols: bool,
    pub dynamic_symbols: bool,
    pub relocations: bool,
    pub needed: bool,
}

impl Options {
    /// Print everything.
    pub fn all() -> Self {
        Options {
            headers: true,
            symbols: true,
            dynamic_symbols: true,
            relocations: true,
            needed: true,
        }
    }
}

pub fn print<W: Write, E: Write>(w: &mut W, e: &mut E, data: &[u8], options: &Options) -> Result<()> {
    let file = match ObjectFile::create(data) {
        Ok(file) => file,
        Err(err) => {
            writeln!(e, "Failed to parse file: {}", err)?;
            return Ok(());
        }
    };
    writeln!(
        w,
        "Format: {:?} {}-endian {}-bit",
        file.format(),
        if file.is_little_endian() {
            "little"
        } else {
            "big"
        },
        if file.is_64() { "64" } else { "32" }
    )?;
    writeln!(w, "Kind: {:?}", file.kind())?;
    writeln!(w, "Architecture: {:?}", file.architecture())?;

    if options.headers {
        writeln!(w)?;
        print_sections(w, e, file.sections())?;
    }
    if options.symbols {
        writeln!(w)?;
        writeln!(w, "Symbols")?;
        print_symbols(w, e, file.symbols())?;
    }
    if options.dynamic_symbols && !file.dynamic_symbols().is_at_end() {
        writeln!(w)?;
        writeln!(w, "Dynamic symbols")?;
        print_symbols(w, e, file.dynamic_symbols())?;
    }
    if options.relocations {
        print_relocations(w, e, file.sections())?;
    }
    if options.needed && !file.needed_libraries().is_at_end() {
        writeln!(w)?;
        writeln!(w, "Needed libraries")?;
        for library in file.needed_libraries() {
            match library.path() {
                Ok(path) => writeln!(w, "{}", path)?,
                Err(err) => writeln!(e, "Failed to parse needed library: {}", err)?,
            }
        }
    }
    Ok(())
}

fn print_sections<W: Write, E: Write>(
    w: &mut W,
    e: &mut E,
    mut sections: SectionIterator<'_>,
) -> Result<()> {
    writeln!(w, "Idx Name                 Size     Address          Align Flags")?;
    while !sections.is_at_end() {
        let section = match sections.current() {
            Ok(section) => section,
            Err(err) => {
                writeln!(e, "Failed to read section: {}", err)?;
                break;
            }
        };
        let name = section.name().unwrap_or("<invalid name>");
        let mut flags = Vec::new();
        if section.is_text().unwrap_or(false) {
            flags.push("CODE");
        }
        if section.is_data().unwrap_or(false) {
            flags.push("DATA");
        }
        if section.is_bss().unwrap_or(false) {
            flags.push("BSS");
        }
        if section.is_compressed().unwrap_or(false) {
            flags.push("COMPRESSED");
        }
        match (section.size(), section.address(), section.alignment()) {
            (Ok(size), Ok(address), Ok(align)) => writeln!(
                w,
                "{:3} {:<20} {:08x} {:016x} {:<5} {}",
                section.index().0,
                name,
                size,
                address,
                align,
                flags.join(", ")
            )?,
            (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                writeln!(e, "Failed to read section {}: {}", name, err)?
            }
        }
        if sections.move_next().is_err() {
            break;
        }
    }
    Ok(())
}

fn print_symbols<W: Write, E: Write>(
    w: &mut W,
    e: &mut E,
    symbols: SymbolIterator<'_>,
) -> Result<()> {
    for symbol in symbols {
        let name = match symbol.name() {
            Ok(name) => name,
            Err(err) => {
                writeln!(e, "Failed to read symbol {}: {}", symbol.index(), err)?;
                continue;
            }
        };
        let kind = match symbol.nm_type_char() {
            Ok(kind) => kind,
            Err(err) => {
                writeln!(e, "Failed to read symbol {}: {}", name, err)?;
                continue;
            }
        };
        if symbol.is_undefined().unwrap_or(false) {
            writeln!(w, "{:16} {} {}", "", kind, name)?;
        } else {
            let address = symbol.address().unwrap_or(0);
            writeln!(w, "{:016x} {} {}", address, kind, name)?;
        }
    }
    Ok(())
}

fn print_relocations<W: Write, E: Write>(
    w: &mut W,
    e: &mut E,
    sections: SectionIterator<'_>,
) -> Result<()> {
    for section in sections {
        let relocations = match section.relocations() {
            Ok(relocations) => relocations,
            Err(err) => {
                writeln!(e, "Failed to read relocations: {}", err)?;
                continue;
            }
        };
        if relocations.is_at_end() {
            continue;
        }
        writeln!(w)?;
        writeln!(
            w,
            "Relocations for [{}]:",
            section.name().unwrap_or("<invalid name>")
        )?;
        writeln!(w, "{:<16} {:<24} VALUE", "OFFSET", "TYPE")?;
        for relocation in relocations {
            let offset = relocation.offset();
            let type_name = relocation.type_name();
            let value = relocation.value_string();
            match (offset, type_name, value) {
                (Ok(offset), Ok(type_name), Ok(value)) => {
                    writeln!(w, "{:016x} {:<24} {}", offset, type_name, value)?
                }
                (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                    writeln!(e, "Failed to read relocation: {}", err)?
                }
            }
        }
    }
    Ok(())
}

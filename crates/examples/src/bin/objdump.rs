use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{command, Arg, ArgAction};
use objinspect_examples::objdump;

fn main() -> Result<()> {
    let matches = command!()
        .max_term_width(100)
        .args(&[
            Arg::new("input")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The object file to inspect"),
            Arg::new("section-headers")
                .short('h')
                .long("section-headers")
                .action(ArgAction::SetTrue)
                .help("Print the section headers"),
            Arg::new("syms")
                .short('t')
                .long("syms")
                .action(ArgAction::SetTrue)
                .help("Print the symbol table"),
            Arg::new("dynamic-syms")
                .short('T')
                .long("dynamic-syms")
                .action(ArgAction::SetTrue)
                .help("Print the dynamic symbol table"),
            Arg::new("reloc")
                .short('r')
                .long("reloc")
                .action(ArgAction::SetTrue)
                .help("Print the relocations of each section"),
            Arg::new("needed")
                .short('n')
                .long("needed")
                .action(ArgAction::SetTrue)
                .help("Print the shared libraries that the file depends on"),
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output"),
        ])
        .disable_help_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::Help)
                .help("Print help"),
        )
        .get_matches();

    if matches.get_flag("verbose") {
        env_logger::builder()
            .format_level(false)
            .format_target(false)
            .filter_module("objinspect", log::LevelFilter::Debug)
            .init();
    }

    let mut options = objdump::Options {
        headers: matches.get_flag("section-headers"),
        symbols: matches.get_flag("syms"),
        dynamic_symbols: matches.get_flag("dynamic-syms"),
        relocations: matches.get_flag("reloc"),
        needed: matches.get_flag("needed"),
    };
    if !(options.headers
        || options.symbols
        || options.dynamic_symbols
        || options.relocations
        || options.needed)
    {
        options = objdump::Options::all();
    }

    let path = matches.get_one::<PathBuf>("input").unwrap();
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
    let data = unsafe { memmap2::Mmap::map(&file) }
        .with_context(|| format!("Failed to map input file '{}'", path.display()))?;
    log::debug!("Mapped {} bytes from '{}'", data.len(), path.display());

    let stdout = io::stdout();
    let stderr = io::stderr();
    objdump::print(&mut stdout.lock(), &mut stderr.lock(), &data, &options)
        .context("Failed to write output")?;
    Ok(())
}

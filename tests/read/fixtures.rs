//! Builders for small object files, laid out by hand in memory.

#![allow(dead_code)]

#[cfg(feature = "elf")]
use objinspect::elf;
#[cfg(feature = "macho")]
use objinspect::macho;
#[cfg(feature = "coff")]
use objinspect::pe;

/// A byte buffer with an endianness and an address size.
#[derive(Debug, Default, Clone)]
pub struct Buffer {
    pub data: Vec<u8>,
    big_endian: bool,
    is_64: bool,
}

impl Buffer {
    pub fn new(big_endian: bool, is_64: bool) -> Self {
        Buffer {
            data: Vec::new(),
            big_endian,
            is_64,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub fn zeros(&mut self, count: usize) {
        self.data.resize(self.data.len() + count, 0);
    }

    /// Write `name` padded with zeros to `size` bytes.
    pub fn fixed(&mut self, name: &[u8], size: usize) {
        assert!(name.len() <= size);
        self.bytes(name);
        self.zeros(size - name.len());
    }

    pub fn align(&mut self, align: usize) {
        while self.data.len() % align != 0 {
            self.data.push(0);
        }
    }

    pub fn u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub fn u16(&mut self, value: u16) {
        if self.big_endian {
            self.bytes(&value.to_be_bytes());
        } else {
            self.bytes(&value.to_le_bytes());
        }
    }

    pub fn u32(&mut self, value: u32) {
        if self.big_endian {
            self.bytes(&value.to_be_bytes());
        } else {
            self.bytes(&value.to_le_bytes());
        }
    }

    pub fn u64(&mut self, value: u64) {
        if self.big_endian {
            self.bytes(&value.to_be_bytes());
        } else {
            self.bytes(&value.to_le_bytes());
        }
    }

    /// Write an address sized value.
    pub fn word(&mut self, value: u64) {
        if self.is_64 {
            self.u64(value);
        } else {
            self.u32(value as u32);
        }
    }

    /// Overwrite the start of the buffer.
    pub fn patch(&mut self, offset: usize, other: &Buffer) {
        self.data[offset..offset + other.len()].copy_from_slice(&other.data);
    }
}

/// A string table under construction.
#[derive(Debug, Clone)]
pub struct Strings {
    data: Vec<u8>,
    base: u32,
}

impl Strings {
    /// Start a table with a leading null string. Offsets are relative to `base`.
    pub fn new(base: u32) -> Self {
        Strings {
            data: vec![0],
            base,
        }
    }

    pub fn add(&mut self, name: &[u8]) -> u32 {
        let offset = self.base + self.data.len() as u32;
        self.data.extend_from_slice(name);
        self.data.push(0);
        offset
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(feature = "elf")]
pub use self::elf_fixtures::*;

#[cfg(feature = "elf")]
mod elf_fixtures {
    use super::*;

    /// An ELF section under construction.
    #[derive(Debug, Default, Clone)]
    pub struct ElfSection {
        pub name: &'static [u8],
        pub sh_type: u32,
        pub flags: u64,
        pub addr: u64,
        pub data: Vec<u8>,
        /// The size of `SHT_NOBITS` sections.
        pub nobits_size: u64,
        pub link: u32,
        pub info: u32,
        pub align: u64,
        pub entsize: u64,
    }

    /// An ELF file under construction.
    ///
    /// Section 0 is added automatically, and the section name table is
    /// appended as the last section.
    #[derive(Debug)]
    pub struct ElfBuilder {
        pub big_endian: bool,
        pub is_64: bool,
        sections: Vec<ElfSection>,
    }

    impl ElfBuilder {
        pub fn new(big_endian: bool, is_64: bool) -> Self {
            ElfBuilder {
                big_endian,
                is_64,
                sections: vec![ElfSection::default()],
            }
        }

        pub fn buffer(&self) -> Buffer {
            Buffer::new(self.big_endian, self.is_64)
        }

        /// Add a section and return its index.
        pub fn section(&mut self, section: ElfSection) -> u32 {
            self.sections.push(section);
            self.sections.len() as u32 - 1
        }

        /// Write a symbol table entry.
        pub fn sym(
            &self,
            b: &mut Buffer,
            name: u32,
            bind: u8,
            st_type: u8,
            shndx: u16,
            value: u64,
            size: u64,
        ) {
            let info = (bind << 4) | st_type;
            b.u32(name);
            if self.is_64 {
                b.u8(info);
                b.u8(0);
                b.u16(shndx);
                b.u64(value);
                b.u64(size);
            } else {
                b.u32(value as u32);
                b.u32(size as u32);
                b.u8(info);
                b.u8(0);
                b.u16(shndx);
            }
        }

        /// Write a relocation entry, with an addend if `addend` is `Some`.
        pub fn rel(&self, b: &mut Buffer, offset: u64, sym: u32, r_type: u32, addend: Option<i64>) {
            b.word(offset);
            if self.is_64 {
                b.u64((u64::from(sym) << 32) | u64::from(r_type));
            } else {
                b.u32((sym << 8) | (r_type & 0xff));
            }
            if let Some(addend) = addend {
                b.word(addend as u64);
            }
        }

        pub fn dynamic(&self, b: &mut Buffer, tag: u32, val: u64) {
            b.word(tag.into());
            b.word(val);
        }

        pub fn sym_size(&self) -> u64 {
            if self.is_64 {
                24
            } else {
                16
            }
        }

        pub fn finish(mut self, e_type: u16, e_machine: u16) -> Vec<u8> {
            let mut shstrtab = Strings::new(0);
            let names: Vec<u32> = self
                .sections
                .iter()
                .map(|section| {
                    if section.name.is_empty() {
                        0
                    } else {
                        shstrtab.add(section.name)
                    }
                })
                .collect();
            let shstrtab_name = shstrtab.add(b".shstrtab");
            self.sections.push(ElfSection {
                name: b".shstrtab",
                sh_type: elf::SHT_STRTAB,
                data: shstrtab.data().to_vec(),
                align: 1,
                ..Default::default()
            });
            let shstrndx = self.sections.len() - 1;

            let header_size = if self.is_64 { 64 } else { 52 };
            let mut b = self.buffer();
            b.zeros(header_size);
            let mut offsets = Vec::new();
            for section in &self.sections {
                b.align(8);
                offsets.push(b.len() as u64);
                b.bytes(&section.data);
            }
            b.align(8);
            let shoff = b.len() as u64;
            for (index, section) in self.sections.iter().enumerate() {
                let name = if index == shstrndx {
                    shstrtab_name
                } else {
                    names[index]
                };
                let (offset, size) = if index == 0 {
                    (0, 0)
                } else if section.sh_type == elf::SHT_NOBITS {
                    (offsets[index], section.nobits_size)
                } else {
                    (offsets[index], section.data.len() as u64)
                };
                b.u32(name);
                b.u32(section.sh_type);
                b.word(section.flags);
                b.word(section.addr);
                b.word(offset);
                b.word(size);
                b.u32(section.link);
                b.u32(section.info);
                b.word(section.align);
                b.word(section.entsize);
            }

            let mut h = self.buffer();
            h.bytes(&elf::ELFMAG);
            h.u8(if self.is_64 {
                elf::ELFCLASS64
            } else {
                elf::ELFCLASS32
            });
            h.u8(if self.big_endian {
                elf::ELFDATA2MSB
            } else {
                elf::ELFDATA2LSB
            });
            h.u8(elf::EV_CURRENT);
            h.zeros(9);
            h.u16(e_type);
            h.u16(e_machine);
            h.u32(u32::from(elf::EV_CURRENT));
            h.word(0);
            h.word(0);
            h.word(shoff);
            h.u32(0);
            h.u16(header_size as u16);
            h.u16(0);
            h.u16(0);
            h.u16(if self.is_64 { 64 } else { 40 });
            h.u16(self.sections.len() as u16);
            h.u16(shstrndx as u16);
            b.patch(0, &h);
            b.data
        }
    }

    /// A little-endian x86-64 executable.
    ///
    /// - `.text` at 0x1000, 16 bytes, with `main` at its start.
    /// - `.rela.text` with `puts-0x4`, `main+0x10` and an absolute relocation.
    /// - `.dynamic` that needs `libc.so.6` and `libm.so.6`.
    pub fn elf64_executable() -> Vec<u8> {
        let mut elf = ElfBuilder::new(false, true);
        const TEXT: u16 = 1;
        const SYMTAB: u32 = 3;
        const STRTAB: u32 = 4;
        const DYNSTR: u32 = 5;

        let mut strings = Strings::new(0);
        let main = strings.add(b"main");
        let puts = strings.add(b"puts");
        let mut dynstr = Strings::new(0);
        let libc = dynstr.add(b"libc.so.6");
        let libm = dynstr.add(b"libm.so.6");

        let mut symbols = elf.buffer();
        symbols.zeros(24);
        elf.sym(&mut symbols, main, elf::STB_GLOBAL, elf::STT_FUNC, TEXT, 0x1000, 16);
        elf.sym(&mut symbols, puts, elf::STB_GLOBAL, elf::STT_NOTYPE, elf::SHN_UNDEF, 0, 0);

        let mut relocations = elf.buffer();
        elf.rel(&mut relocations, 0x1004, 2, elf::R_X86_64_PLT32, Some(-4));
        elf.rel(&mut relocations, 0x1008, 1, elf::R_X86_64_64, Some(0x10));
        elf.rel(&mut relocations, 0x100c, 0, elf::R_X86_64_RELATIVE, Some(0));

        let mut dynamic = elf.buffer();
        elf.dynamic(&mut dynamic, elf::DT_NEEDED, libc.into());
        elf.dynamic(&mut dynamic, elf::DT_NEEDED, libm.into());
        elf.dynamic(&mut dynamic, elf::DT_NULL, 0);

        elf.section(ElfSection {
            name: b".text",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_EXECINSTR),
            addr: 0x1000,
            data: vec![0x90; 16],
            align: 16,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".rela.text",
            sh_type: elf::SHT_RELA,
            data: relocations.data,
            link: SYMTAB,
            info: u32::from(TEXT),
            align: 8,
            entsize: 24,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".symtab",
            sh_type: elf::SHT_SYMTAB,
            data: symbols.data,
            link: STRTAB,
            info: 1,
            align: 8,
            entsize: 24,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".strtab",
            sh_type: elf::SHT_STRTAB,
            data: strings.data().to_vec(),
            align: 1,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".dynstr",
            sh_type: elf::SHT_STRTAB,
            flags: u64::from(elf::SHF_ALLOC),
            data: dynstr.data().to_vec(),
            align: 1,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".dynamic",
            sh_type: elf::SHT_DYNAMIC,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_WRITE),
            data: dynamic.data,
            link: DYNSTR,
            align: 8,
            entsize: 16,
            ..Default::default()
        });
        elf.finish(elf::ET_EXEC, elf::EM_X86_64)
    }

    /// A little-endian x86-64 shared object with only a dynamic symbol table.
    ///
    /// - `.dynsym` with the undefined `foo` and `bar` at 0x1000 in `.text`.
    /// - `.rela.plt`, linked to `.dynsym`, with a `R_X86_64_JUMP_SLOT`
    ///   against `foo` at 0x2008 in `.got.plt`.
    /// - `.dynamic` that needs `libc.so.6` and names itself `libfoo.so`.
    pub fn elf64_shared_object() -> Vec<u8> {
        let mut elf = ElfBuilder::new(false, true);
        const TEXT: u16 = 1;
        const DYNSYM: u32 = 2;
        const DYNSTR: u32 = 3;
        const GOT_PLT: u32 = 5;

        let mut dynstr = Strings::new(0);
        let foo = dynstr.add(b"foo");
        let bar = dynstr.add(b"bar");
        let libc = dynstr.add(b"libc.so.6");
        let soname = dynstr.add(b"libfoo.so");

        let mut symbols = elf.buffer();
        symbols.zeros(24);
        elf.sym(&mut symbols, foo, elf::STB_GLOBAL, elf::STT_FUNC, elf::SHN_UNDEF, 0, 0);
        elf.sym(&mut symbols, bar, elf::STB_GLOBAL, elf::STT_FUNC, TEXT, 0x1000, 16);

        let mut relocations = elf.buffer();
        elf.rel(&mut relocations, 0x2008, 1, elf::R_X86_64_JUMP_SLOT, Some(0));

        let mut dynamic = elf.buffer();
        elf.dynamic(&mut dynamic, elf::DT_NEEDED, libc.into());
        elf.dynamic(&mut dynamic, elf::DT_SONAME, soname.into());
        elf.dynamic(&mut dynamic, elf::DT_NULL, 0);

        elf.section(ElfSection {
            name: b".text",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_EXECINSTR),
            addr: 0x1000,
            data: vec![0xc3; 16],
            align: 16,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".dynsym",
            sh_type: elf::SHT_DYNSYM,
            flags: u64::from(elf::SHF_ALLOC),
            data: symbols.data,
            link: DYNSTR,
            info: 1,
            align: 8,
            entsize: 24,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".dynstr",
            sh_type: elf::SHT_STRTAB,
            flags: u64::from(elf::SHF_ALLOC),
            data: dynstr.data().to_vec(),
            align: 1,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".rela.plt",
            sh_type: elf::SHT_RELA,
            flags: u64::from(elf::SHF_ALLOC),
            data: relocations.data,
            link: DYNSYM,
            info: GOT_PLT,
            align: 8,
            entsize: 24,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".got.plt",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_WRITE),
            addr: 0x2000,
            data: vec![0; 16],
            align: 8,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".dynamic",
            sh_type: elf::SHT_DYNAMIC,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_WRITE),
            data: dynamic.data,
            link: DYNSTR,
            align: 8,
            entsize: 16,
            ..Default::default()
        });
        elf.finish(elf::ET_DYN, elf::EM_X86_64)
    }

    /// A 32-bit relocatable object with `.text`, `.data` and `.bss`.
    ///
    /// `.rel.text` has a relocation against the `.data` section symbol and
    /// one against the undefined `extern_fn`.
    pub fn elf32_relocatable(big_endian: bool) -> Vec<u8> {
        let mut elf = ElfBuilder::new(big_endian, false);
        const TEXT: u16 = 1;
        const DATA: u16 = 2;
        const BSS: u16 = 3;
        const SYMTAB: u32 = 5;
        const STRTAB: u32 = 6;

        let mut strings = Strings::new(0);
        let file = strings.add(b"file.c");
        let counter = strings.add(b"counter");
        let buffer = strings.add(b"buffer");
        let start = strings.add(b"start");
        let extern_fn = strings.add(b"extern_fn");

        let mut symbols = elf.buffer();
        symbols.zeros(16);
        elf.sym(&mut symbols, file, elf::STB_LOCAL, elf::STT_FILE, elf::SHN_ABS, 0, 0);
        elf.sym(&mut symbols, 0, elf::STB_LOCAL, elf::STT_SECTION, DATA, 0, 0);
        elf.sym(&mut symbols, buffer, elf::STB_LOCAL, elf::STT_OBJECT, BSS, 0, 16);
        elf.sym(&mut symbols, counter, elf::STB_GLOBAL, elf::STT_OBJECT, DATA, 4, 4);
        elf.sym(&mut symbols, start, elf::STB_GLOBAL, elf::STT_FUNC, TEXT, 0, 8);
        elf.sym(&mut symbols, extern_fn, elf::STB_GLOBAL, elf::STT_NOTYPE, elf::SHN_UNDEF, 0, 0);

        let mut relocations = elf.buffer();
        elf.rel(&mut relocations, 1, 2, elf::R_386_32, None);
        elf.rel(&mut relocations, 4, 6, elf::R_386_PC32, None);

        elf.section(ElfSection {
            name: b".text",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_EXECINSTR),
            data: vec![0x90; 8],
            align: 16,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".data",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_WRITE),
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
            align: 4,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".bss",
            sh_type: elf::SHT_NOBITS,
            flags: u64::from(elf::SHF_ALLOC | elf::SHF_WRITE),
            nobits_size: 16,
            align: 8,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".rel.text",
            sh_type: elf::SHT_REL,
            data: relocations.data,
            link: SYMTAB,
            info: u32::from(TEXT),
            align: 4,
            entsize: 8,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".symtab",
            sh_type: elf::SHT_SYMTAB,
            data: symbols.data,
            link: STRTAB,
            info: 4,
            align: 4,
            entsize: 16,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".strtab",
            sh_type: elf::SHT_STRTAB,
            data: strings.data().to_vec(),
            align: 1,
            ..Default::default()
        });
        let machine = if big_endian { elf::EM_PPC } else { elf::EM_386 };
        elf.finish(elf::ET_REL, machine)
    }

    /// `hello\0` as a zlib stream of one stored block.
    pub const ZLIB_HELLO: &[u8] = &[
        0x78, 0x01, 0x01, 0x06, 0x00, 0xf9, 0xff, b'h', b'e', b'l', b'l', b'o', 0, 0x08, 0x41,
        0x02, 0x15,
    ];

    /// A 64-bit relocatable object with a `SHF_COMPRESSED` `.debug_str` and
    /// a GNU style `.zdebug_str`, both containing `hello\0`.
    pub fn elf64_compressed() -> Vec<u8> {
        let mut elf = ElfBuilder::new(false, true);

        let mut debug_str = elf.buffer();
        debug_str.u32(elf::ELFCOMPRESS_ZLIB);
        debug_str.u32(0);
        debug_str.u64(6);
        debug_str.u64(1);
        debug_str.bytes(ZLIB_HELLO);

        let mut zdebug_str = Buffer::new(true, true);
        zdebug_str.bytes(b"ZLIB");
        zdebug_str.u64(6);
        zdebug_str.bytes(ZLIB_HELLO);

        elf.section(ElfSection {
            name: b".debug_str",
            sh_type: elf::SHT_PROGBITS,
            flags: u64::from(elf::SHF_COMPRESSED),
            data: debug_str.data,
            align: 8,
            ..Default::default()
        });
        elf.section(ElfSection {
            name: b".zdebug_str",
            sh_type: elf::SHT_PROGBITS,
            data: zdebug_str.data,
            align: 1,
            ..Default::default()
        });
        elf.finish(elf::ET_REL, elf::EM_X86_64)
    }
}

/// A little-endian x86-64 Mach-O relocatable object.
///
/// - `__TEXT,__text` at 0, 16 bytes, with relocations against `_printf`
///   (extern) and `__bss` (section ordinal 2).
/// - `__DATA,__bss` at 0x10, 0x20 bytes of zerofill.
/// - Symbols `_main`, `_printf` (undefined), `_buf` (common, 32 bytes) and
///   `_local` in `__bss`.
/// - Dylib load commands for libSystem and a weak libz.
#[cfg(feature = "macho")]
pub fn macho64_object() -> Vec<u8> {
    const HEADER_SIZE: usize = 32;
    const SEGMENT_SIZE: u32 = 72 + 2 * 80;
    const SYMTAB_SIZE: u32 = 24;
    const SYSTEM: &[u8] = b"/usr/lib/libSystem.B.dylib";
    const LIBZ: &[u8] = b"/usr/lib/libz.1.dylib";

    fn dylib_size(name: &[u8]) -> u32 {
        let size = 24 + name.len() as u32 + 1;
        (size + 7) & !7
    }

    let sizeofcmds = SEGMENT_SIZE + SYMTAB_SIZE + dylib_size(SYSTEM) + dylib_size(LIBZ);
    let text_offset = HEADER_SIZE as u32 + sizeofcmds;
    let reloc_offset = text_offset + 16;
    let symbol_offset = reloc_offset + 2 * 8;
    let nsyms = 4;
    let string_offset = symbol_offset + nsyms * 16;

    let mut strings = Strings::new(0);
    let main = strings.add(b"_main");
    let printf = strings.add(b"_printf");
    let buf = strings.add(b"_buf");
    let local = strings.add(b"_local");

    let mut b = Buffer::new(false, true);
    b.u32(macho::MH_MAGIC_64);
    b.u32(macho::CPU_TYPE_X86_64);
    b.u32(3);
    b.u32(macho::MH_OBJECT);
    b.u32(4);
    b.u32(sizeofcmds);
    b.u32(0);
    b.u32(0);

    b.u32(macho::LC_SEGMENT_64);
    b.u32(SEGMENT_SIZE);
    b.fixed(b"", 16);
    b.u64(0);
    b.u64(0x30);
    b.u64(text_offset.into());
    b.u64(16);
    b.u32(7);
    b.u32(7);
    b.u32(2);
    b.u32(0);

    b.fixed(b"__text", 16);
    b.fixed(b"__TEXT", 16);
    b.u64(0);
    b.u64(16);
    b.u32(text_offset);
    b.u32(4);
    b.u32(reloc_offset);
    b.u32(2);
    b.u32(macho::S_ATTR_PURE_INSTRUCTIONS | macho::S_ATTR_SOME_INSTRUCTIONS);
    b.zeros(12);

    b.fixed(b"__bss", 16);
    b.fixed(b"__DATA", 16);
    b.u64(0x10);
    b.u64(0x20);
    b.u32(0);
    b.u32(3);
    b.u32(0);
    b.u32(0);
    b.u32(macho::S_ZEROFILL);
    b.zeros(12);

    b.u32(macho::LC_SYMTAB);
    b.u32(SYMTAB_SIZE);
    b.u32(symbol_offset);
    b.u32(nsyms);
    b.u32(string_offset);
    b.u32(strings.data().len() as u32);

    for (cmd, name) in [(macho::LC_LOAD_DYLIB, SYSTEM), (macho::LC_LOAD_WEAK_DYLIB, LIBZ)] {
        let size = dylib_size(name);
        b.u32(cmd);
        b.u32(size);
        b.u32(24);
        b.u32(0);
        b.u32(0x0001_0000);
        b.u32(0x0001_0000);
        b.fixed(name, size as usize - 24);
    }
    assert_eq!(b.len(), text_offset as usize);

    b.bytes(&[0xe8, 0, 0, 0, 0, 0x90, 0x90, 0x90, 0, 0, 0, 0, 0, 0, 0, 0]);

    // _printf, pc relative, 4 bytes, extern, X86_64_RELOC_BRANCH.
    b.u32(1);
    b.u32(1 | (1 << 24) | (2 << 25) | (1 << 27) | (u32::from(macho::X86_64_RELOC_BRANCH) << 28));
    // Section ordinal 2, 8 bytes, X86_64_RELOC_UNSIGNED.
    b.u32(8);
    b.u32(2 | (3 << 25) | (u32::from(macho::X86_64_RELOC_UNSIGNED) << 28));

    for (strx, n_type, n_sect, n_value) in [
        (main, macho::N_SECT | macho::N_EXT, 1, 0),
        (printf, macho::N_UNDF | macho::N_EXT, 0, 0),
        (buf, macho::N_UNDF | macho::N_EXT, 0, 32),
        (local, macho::N_SECT, 2, 0x14),
    ] {
        b.u32(strx);
        b.u8(n_type);
        b.u8(n_sect);
        b.u16(0);
        b.u64(n_value);
    }
    b.bytes(strings.data());
    b.data
}

/// A 32-bit Mach-O relocatable object, i386 or big-endian PowerPC.
///
/// - `__TEXT,__text` at 0, 8 bytes, with a plain relocation against
///   `_extern` at offset 0 and a scattered `SECTDIFF` relocation at offset 4
///   whose value is 0x1234.
/// - Symbols `_start` and `_extern` (undefined).
#[cfg(feature = "macho")]
pub fn macho32_object(big_endian: bool) -> Vec<u8> {
    const HEADER_SIZE: usize = 28;
    const SEGMENT_SIZE: u32 = 56 + 68;
    const SYMTAB_SIZE: u32 = 24;

    let (cputype, vanilla, sectdiff) = if big_endian {
        (
            macho::CPU_TYPE_POWERPC,
            macho::PPC_RELOC_VANILLA,
            macho::PPC_RELOC_SECTDIFF,
        )
    } else {
        (
            macho::CPU_TYPE_X86,
            macho::GENERIC_RELOC_VANILLA,
            macho::GENERIC_RELOC_SECTDIFF,
        )
    };

    let sizeofcmds = SEGMENT_SIZE + SYMTAB_SIZE;
    let text_offset = HEADER_SIZE as u32 + sizeofcmds;
    let reloc_offset = text_offset + 8;
    let symbol_offset = reloc_offset + 2 * 8;
    let nsyms = 2;
    let string_offset = symbol_offset + nsyms * 12;

    let mut strings = Strings::new(0);
    let start = strings.add(b"_start");
    let extern_ = strings.add(b"_extern");

    let mut b = Buffer::new(big_endian, false);
    b.u32(macho::MH_MAGIC);
    b.u32(cputype);
    b.u32(0);
    b.u32(macho::MH_OBJECT);
    b.u32(2);
    b.u32(sizeofcmds);
    b.u32(0);

    b.u32(macho::LC_SEGMENT);
    b.u32(SEGMENT_SIZE);
    b.fixed(b"", 16);
    b.u32(0);
    b.u32(8);
    b.u32(text_offset);
    b.u32(8);
    b.u32(7);
    b.u32(7);
    b.u32(1);
    b.u32(0);

    b.fixed(b"__text", 16);
    b.fixed(b"__TEXT", 16);
    b.u32(0);
    b.u32(8);
    b.u32(text_offset);
    b.u32(2);
    b.u32(reloc_offset);
    b.u32(2);
    b.u32(macho::S_ATTR_PURE_INSTRUCTIONS | macho::S_ATTR_SOME_INSTRUCTIONS);
    b.zeros(8);

    b.u32(macho::LC_SYMTAB);
    b.u32(SYMTAB_SIZE);
    b.u32(symbol_offset);
    b.u32(nsyms);
    b.u32(string_offset);
    b.u32(strings.data().len() as u32);
    assert_eq!(b.len(), text_offset as usize);

    b.bytes(&[0, 0, 0, 0, 0, 0, 0, 0]);

    // `_extern`, 4 bytes, extern. The bit fields are packed from the other
    // end of the word in big-endian files.
    let (symbolnum, length, r_extern) = (1u32, 2u32, 1u32);
    b.u32(0);
    if big_endian {
        b.u32((symbolnum << 8) | (length << 5) | (r_extern << 4) | u32::from(vanilla));
    } else {
        b.u32(symbolnum | (length << 25) | (r_extern << 27) | (u32::from(vanilla) << 28));
    }
    // Scattered, 4 bytes, at offset 4.
    b.u32(macho::R_SCATTERED | (2 << 28) | (u32::from(sectdiff) << 24) | 4);
    b.u32(0x1234);

    for (strx, n_type, n_sect) in [
        (start, macho::N_SECT | macho::N_EXT, 1),
        (extern_, macho::N_UNDF | macho::N_EXT, 0),
    ] {
        b.u32(strx);
        b.u8(n_type);
        b.u8(n_sect);
        b.u16(0);
        b.u32(0);
    }
    b.bytes(strings.data());
    b.data
}

#[cfg(feature = "coff")]
fn coff_section(b: &mut Buffer, name: &[u8], size: u32, data: u32, relocs: u32, nrelocs: u16, characteristics: u32) {
    b.fixed(name, 8);
    b.u32(0);
    b.u32(0);
    b.u32(size);
    b.u32(data);
    b.u32(relocs);
    b.u32(0);
    b.u16(nrelocs);
    b.u16(0);
    b.u32(characteristics);
}

#[cfg(feature = "coff")]
fn coff_symbol(b: &mut Buffer, name: &[u8], value: u32, section: i16, typ: u16, class: u8, naux: u8) {
    b.fixed(name, 8);
    b.u32(value);
    b.u16(section as u16);
    b.u16(typ);
    b.u8(class);
    b.u8(naux);
}

/// An x86-64 COFF relocatable object.
///
/// - Sections `.text` (16 bytes, one relocation against `puts`), `.bss` and
///   `.debug_abbrev`, whose name is in the string table.
/// - Symbols `.file` (with the file name in an auxiliary record), the
///   `.text` section definition, `main`, `puts` (undefined),
///   `a_very_long_symbol` (common, 8 bytes) and the static `counter` in `.bss`.
#[cfg(feature = "coff")]
pub fn coff_object() -> Vec<u8> {
    const SECTIONS: u16 = 3;
    let text_offset = 20 + 40 * u32::from(SECTIONS);
    let reloc_offset = text_offset + 16;
    let debug_offset = reloc_offset + 10;
    let symbol_offset = debug_offset + 4;
    let nsyms = 8;

    let mut strings = Strings::new(4);
    let debug_name = strings.add(b".debug_abbrev");
    let long_name = strings.add(b"a_very_long_symbol");
    // The table has no leading null string.
    let string_data = &strings.data()[1..];
    let (debug_name, long_name) = (debug_name - 1, long_name - 1);

    let mut b = Buffer::new(false, false);
    b.u16(pe::IMAGE_FILE_MACHINE_AMD64);
    b.u16(SECTIONS);
    b.u32(0);
    b.u32(symbol_offset);
    b.u32(nsyms);
    b.u16(0);
    b.u16(0);

    coff_section(
        &mut b,
        b".text",
        16,
        text_offset,
        reloc_offset,
        1,
        pe::IMAGE_SCN_CNT_CODE
            | pe::IMAGE_SCN_MEM_EXECUTE
            | pe::IMAGE_SCN_MEM_READ
            | pe::IMAGE_SCN_ALIGN_16BYTES,
    );
    coff_section(
        &mut b,
        b".bss",
        8,
        0,
        0,
        0,
        pe::IMAGE_SCN_CNT_UNINITIALIZED_DATA
            | pe::IMAGE_SCN_MEM_READ
            | pe::IMAGE_SCN_MEM_WRITE
            | pe::IMAGE_SCN_ALIGN_16BYTES,
    );
    coff_section(
        &mut b,
        format!("/{}", debug_name).as_bytes(),
        4,
        debug_offset,
        0,
        0,
        pe::IMAGE_SCN_CNT_INITIALIZED_DATA
            | pe::IMAGE_SCN_MEM_DISCARDABLE
            | pe::IMAGE_SCN_MEM_READ
            | pe::IMAGE_SCN_ALIGN_1BYTES,
    );
    assert_eq!(b.len(), text_offset as usize);

    b.bytes(&[0xe8, 0, 0, 0, 0, 0xc3, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    b.u32(1);
    b.u32(5);
    b.u16(pe::IMAGE_REL_AMD64_REL32);
    b.bytes(&[1, 2, 3, 4]);
    assert_eq!(b.len(), symbol_offset as usize);

    let function = pe::IMAGE_SYM_DTYPE_FUNCTION << pe::IMAGE_SYM_DTYPE_SHIFT;
    coff_symbol(&mut b, b".file", 0, -2, 0, pe::IMAGE_SYM_CLASS_FILE, 1);
    b.fixed(b"test.c", 18);
    coff_symbol(&mut b, b".text", 0, 1, 0, pe::IMAGE_SYM_CLASS_STATIC, 1);
    b.u32(16);
    b.u16(1);
    b.zeros(12);
    coff_symbol(&mut b, b"main", 0, 1, function, pe::IMAGE_SYM_CLASS_EXTERNAL, 0);
    coff_symbol(&mut b, b"puts", 0, 0, 0, pe::IMAGE_SYM_CLASS_EXTERNAL, 0);
    let mut name = [0u8; 8];
    name[4..].copy_from_slice(&long_name.to_le_bytes());
    coff_symbol(&mut b, &name, 8, 0, 0, pe::IMAGE_SYM_CLASS_EXTERNAL, 0);
    coff_symbol(&mut b, b"counter", 4, 2, 0, pe::IMAGE_SYM_CLASS_STATIC, 0);

    b.u32(4 + string_data.len() as u32);
    b.bytes(string_data);
    b.data
}

/// A PE32+ x86-64 executable that imports from `KERNEL32.dll` and `msvcrt.dll`.
///
/// The image base is 0x1_4000_0000 and its only section, `.rdata`, is at
/// RVA 0x1000 and file offset 0x200.
#[cfg(feature = "coff")]
pub fn pe64_executable() -> Vec<u8> {
    const NT_OFFSET: u32 = 0x40;
    const OPTIONAL_SIZE: u16 = 112 + 16 * 8;

    let mut b = Buffer::new(false, true);
    b.u16(pe::IMAGE_DOS_SIGNATURE);
    b.zeros(0x3a);
    b.u32(NT_OFFSET);
    assert_eq!(b.len(), NT_OFFSET as usize);

    b.u32(pe::IMAGE_NT_SIGNATURE);
    b.u16(pe::IMAGE_FILE_MACHINE_AMD64);
    b.u16(1);
    b.u32(0);
    b.u32(0);
    b.u32(0);
    b.u16(OPTIONAL_SIZE);
    b.u16(pe::IMAGE_FILE_EXECUTABLE_IMAGE);

    let optional_offset = b.len();
    b.u16(pe::IMAGE_NT_OPTIONAL_HDR64_MAGIC);
    b.zeros(22);
    b.u64(0x1_4000_0000);
    b.u32(0x1000);
    b.u32(0x200);
    b.zeros(12);
    b.u32(0);
    b.u32(0x2000);
    b.u32(0x200);
    b.u32(0);
    b.u16(3);
    b.u16(0);
    b.zeros(32);
    b.u32(0);
    b.u32(16);
    for index in 0..16 {
        if index == pe::IMAGE_DIRECTORY_ENTRY_IMPORT {
            b.u32(0x1000);
            b.u32(60);
        } else {
            b.u64(0);
        }
    }
    assert_eq!(b.len(), optional_offset + usize::from(OPTIONAL_SIZE));

    b.fixed(b".rdata", 8);
    b.u32(0x100);
    b.u32(0x1000);
    b.u32(0x200);
    b.u32(0x200);
    b.u32(0);
    b.u32(0);
    b.u16(0);
    b.u16(0);
    b.u32(pe::IMAGE_SCN_CNT_INITIALIZED_DATA | pe::IMAGE_SCN_MEM_READ);

    b.zeros(0x200 - b.len());
    for name in [0x1050, 0x1060] {
        b.u32(0);
        b.u32(0);
        b.u32(0);
        b.u32(name);
        b.u32(0);
    }
    b.zeros(20);
    b.zeros(0x250 - b.len());
    b.fixed(b"KERNEL32.dll", 16);
    b.fixed(b"msvcrt.dll", 16);
    b.zeros(0x400 - b.len());
    b.data
}

//! Field layouts of the 32-bit and 64-bit ELF headers.
//!
//! Both classes describe the same logical attributes; only offsets and field
//! widths differ. [`HeaderLayout`] captures those differences so the program
//! header walker can be written once and instantiated per class.

use crate::formats::elf::types::*;
use crate::formats::elf::utils::EndianRead;

/// Per-class accessors for the file header and program header entries.
pub trait HeaderLayout {
    /// The class this layout decodes.
    const CLASS: ElfClass;

    /// `e_phoff`: file offset of the program header table.
    fn phoff(ehdr: &[u8], endian: ElfData) -> Result<u64>;

    /// `e_phentsize`: stride between program header entries.
    fn phentsize(ehdr: &[u8], endian: ElfData) -> Result<u16>;

    /// `e_phnum`: number of program header entries.
    fn phnum(ehdr: &[u8], endian: ElfData) -> Result<u16>;

    /// Decode the program header entry starting at `entry[0]`.
    fn segment(entry: &[u8], index: usize, endian: ElfData) -> Result<Segment>;
}

/// `Elf32_Ehdr` / `Elf32_Phdr`
#[derive(Debug, Clone, Copy)]
pub struct Elf32;

/// `Elf64_Ehdr` / `Elf64_Phdr`
#[derive(Debug, Clone, Copy)]
pub struct Elf64;

impl HeaderLayout for Elf32 {
    const CLASS: ElfClass = ElfClass::Elf32;

    fn phoff(ehdr: &[u8], endian: ElfData) -> Result<u64> {
        ehdr.read_u32(28, endian).map(u64::from)
    }

    fn phentsize(ehdr: &[u8], endian: ElfData) -> Result<u16> {
        ehdr.read_u16(42, endian)
    }

    fn phnum(ehdr: &[u8], endian: ElfData) -> Result<u16> {
        ehdr.read_u16(44, endian)
    }

    // p_type, p_offset, p_vaddr, p_paddr, p_filesz, p_memsz, p_flags, p_align
    fn segment(entry: &[u8], index: usize, endian: ElfData) -> Result<Segment> {
        Ok(Segment {
            index,
            kind: SegmentKind::from(entry.read_u32(0, endian)?),
            physical_address: entry.read_u32(12, endian)?.into(),
            memory_size: entry.read_u32(20, endian)?.into(),
            flags: SegmentFlags::from_bits_retain(entry.read_u32(24, endian)?),
            alignment: entry.read_u32(28, endian)?.into(),
        })
    }
}

impl HeaderLayout for Elf64 {
    const CLASS: ElfClass = ElfClass::Elf64;

    fn phoff(ehdr: &[u8], endian: ElfData) -> Result<u64> {
        ehdr.read_u64(32, endian)
    }

    fn phentsize(ehdr: &[u8], endian: ElfData) -> Result<u16> {
        ehdr.read_u16(54, endian)
    }

    fn phnum(ehdr: &[u8], endian: ElfData) -> Result<u16> {
        ehdr.read_u16(56, endian)
    }

    // p_type, p_flags, p_offset, p_vaddr, p_paddr, p_filesz, p_memsz, p_align
    fn segment(entry: &[u8], index: usize, endian: ElfData) -> Result<Segment> {
        Ok(Segment {
            index,
            kind: SegmentKind::from(entry.read_u32(0, endian)?),
            flags: SegmentFlags::from_bits_retain(entry.read_u32(4, endian)?),
            physical_address: entry.read_u64(24, endian)?,
            memory_size: entry.read_u64(40, endian)?,
            alignment: entry.read_u64(48, endian)?,
        })
    }
}

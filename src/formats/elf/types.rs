//! Core ELF types and constants

use bitflags::bitflags;
use std::fmt;

/// ELF parsing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElfError {
    InvalidMagic,
    UnsupportedClass(u8),
    UnsupportedData(u8),
    Truncated { offset: usize, needed: usize },
    MalformedProgramHeaders(String),
    InvalidAlignment(u64),
    AddressOverflow { address: u64, size: u64 },
}

impl fmt::Display for ElfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMagic => write!(f, "not an ELF binary"),
            Self::UnsupportedClass(c) => write!(f, "invalid ELF class ({})", c),
            Self::UnsupportedData(d) => write!(f, "invalid ELF data encoding ({})", d),
            Self::Truncated { offset, needed } => {
                write!(f, "truncated at {:#x}, needed {} bytes", offset, needed)
            }
            Self::MalformedProgramHeaders(msg) => {
                write!(f, "malformed program header table: {}", msg)
            }
            Self::InvalidAlignment(align) => {
                write!(f, "invalid alignment {:#x} (not a power of two)", align)
            }
            Self::AddressOverflow { address, size } => write!(
                f,
                "address overflow: {:#x} + {:#x} exceeds 64 bits",
                address, size
            ),
        }
    }
}

impl std::error::Error for ElfError {}

pub type Result<T> = std::result::Result<T, ElfError>;

/// ELF magic number
pub const ELF_MAGIC: &[u8; 4] = b"\x7fELF";

/// Index of `EI_CLASS` in `e_ident`
pub const EI_CLASS: usize = 4;
/// Index of `EI_DATA` in `e_ident`
pub const EI_DATA: usize = 5;
/// Size of `e_ident`
pub const EI_NIDENT: usize = 16;

// Program header types
pub const PT_LOAD: u32 = 1;
pub const PT_NOTE: u32 = 4;
pub const PT_GNU_STACK: u32 = 0x6474e551;

/// ELF class (32-bit or 64-bit)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    Elf32 = 1,
    Elf64 = 2,
}

impl ElfClass {
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            1 => Ok(ElfClass::Elf32),
            2 => Ok(ElfClass::Elf64),
            _ => Err(ElfError::UnsupportedClass(val)),
        }
    }

    pub fn bits(&self) -> u8 {
        match self {
            ElfClass::Elf32 => 32,
            ElfClass::Elf64 => 64,
        }
    }

    /// Size of the file header (`Ehdr`) for this class.
    pub fn header_size(&self) -> usize {
        match self {
            ElfClass::Elf32 => 52,
            ElfClass::Elf64 => 64,
        }
    }

    /// Size of one program header (`Phdr`) for this class.
    pub fn program_header_size(&self) -> usize {
        match self {
            ElfClass::Elf32 => 32,
            ElfClass::Elf64 => 56,
        }
    }
}

/// ELF data encoding (endianness)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfData {
    Little = 1,
    Big = 2,
}

impl ElfData {
    pub fn from_u8(val: u8) -> Result<Self> {
        match val {
            1 => Ok(ElfData::Little),
            2 => Ok(ElfData::Big),
            _ => Err(ElfError::UnsupportedData(val)),
        }
    }

    pub fn is_little_endian(&self) -> bool {
        matches!(self, ElfData::Little)
    }
}

/// ELF identification (first 16 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfIdent {
    pub class: ElfClass,
    pub data: ElfData,
    pub version: u8,
}

/// The subset of the ELF file header needed to find the program headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfHeader {
    pub ident: ElfIdent,
    pub e_type: u16,
    pub e_machine: u16,
    pub e_phoff: u64,
    pub e_phentsize: u16,
    pub e_phnum: u16,
}

bitflags! {
    /// Segment permission bits (`p_flags`).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SegmentFlags: u32 {
        const EXECUTE = 0x1;
        const WRITE = 0x2;
        const READ = 0x4;
    }
}

impl SegmentFlags {
    /// Any of read, write or execute.
    pub fn is_accessible(&self) -> bool {
        self.intersects(Self::READ | Self::WRITE | Self::EXECUTE)
    }
}

impl fmt::Display for SegmentFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = if self.contains(Self::READ) { 'R' } else { '-' };
        let w = if self.contains(Self::WRITE) { 'W' } else { '-' };
        let x = if self.contains(Self::EXECUTE) { 'X' } else { '-' };
        write!(f, "{}{}{}", r, w, x)
    }
}

/// Segment type (`p_type`); only LOAD is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Load,
    Other(u32),
}

impl From<u32> for SegmentKind {
    fn from(val: u32) -> Self {
        match val {
            PT_LOAD => SegmentKind::Load,
            other => SegmentKind::Other(other),
        }
    }
}

/// One program header entry, decoded from the mapped bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Position in the program header table
    pub index: usize,
    pub kind: SegmentKind,
    pub flags: SegmentFlags,
    pub physical_address: u64,
    pub memory_size: u64,
    pub alignment: u64,
}

impl Segment {
    pub fn is_load(&self) -> bool {
        self.kind == SegmentKind::Load
    }

    pub fn is_executable(&self) -> bool {
        self.flags.contains(SegmentFlags::EXECUTE)
    }

    /// Exclusive end of the segment in physical memory.
    pub fn physical_end(&self) -> Result<u64> {
        self.physical_address
            .checked_add(self.memory_size)
            .ok_or(ElfError::AddressOverflow {
                address: self.physical_address,
                size: self.memory_size,
            })
    }
}

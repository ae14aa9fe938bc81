//! ELF header parsing

use crate::formats::elf::layout::{Elf32, Elf64, HeaderLayout};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::EndianRead;

/// Parse ELF identification bytes
pub fn parse_ident(data: &[u8]) -> Result<ElfIdent> {
    // Anything shorter than the magic, an empty file included, is simply not ELF.
    if data.len() < ELF_MAGIC.len() || &data[..ELF_MAGIC.len()] != ELF_MAGIC {
        return Err(ElfError::InvalidMagic);
    }

    if data.len() < EI_NIDENT {
        return Err(ElfError::Truncated {
            offset: 0,
            needed: EI_NIDENT,
        });
    }

    let class = ElfClass::from_u8(data[EI_CLASS])?;
    let data_encoding = ElfData::from_u8(data[EI_DATA])?;
    let version = data[6];

    Ok(ElfIdent {
        class,
        data: data_encoding,
        version,
    })
}

/// Parse the ELF file header fields that locate the program header table
pub fn parse_header(data: &[u8]) -> Result<ElfHeader> {
    let ident = parse_ident(data)?;

    let header_size = ident.class.header_size();
    if data.len() < header_size {
        return Err(ElfError::Truncated {
            offset: 0,
            needed: header_size,
        });
    }

    let endian = ident.data;
    let e_type = data.read_u16(16, endian)?;
    let e_machine = data.read_u16(18, endian)?;

    let (e_phoff, e_phentsize, e_phnum) = match ident.class {
        ElfClass::Elf32 => table_location::<Elf32>(data, endian)?,
        ElfClass::Elf64 => table_location::<Elf64>(data, endian)?,
    };

    Ok(ElfHeader {
        ident,
        e_type,
        e_machine,
        e_phoff,
        e_phentsize,
        e_phnum,
    })
}

fn table_location<L: HeaderLayout>(data: &[u8], endian: ElfData) -> Result<(u64, u16, u16)> {
    Ok((
        L::phoff(data, endian)?,
        L::phentsize(data, endian)?,
        L::phnum(data, endian)?,
    ))
}

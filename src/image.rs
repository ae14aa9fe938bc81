//! Binary image loading.
//!
//! An [`ElfImage`] owns the read-only mapping of one input file together with
//! its validated ELF header. The mapping is released when the image is
//! dropped, so analyses run inside the image's scope and nothing outlives it.

use crate::error::{ElfUtilError, Result};
use crate::formats::elf::segments::SegmentWalk;
use crate::formats::elf::{ElfClass, ElfData, ElfHeader, ElfParser};
use crate::io::{IOLimits, MappedFile};
use std::path::Path;
use tracing::debug;

/// One mapped and validated ELF file.
#[derive(Debug)]
pub struct ElfImage {
    file: MappedFile,
    header: ElfHeader,
}

impl ElfImage {
    /// Map `path` and validate its ELF identification and header.
    pub fn open<P: AsRef<Path>>(path: P, limits: &IOLimits) -> Result<Self> {
        let path = path.as_ref();
        let file = MappedFile::open(path, limits)?;
        let header = *ElfParser::parse(file.as_bytes())
            .map_err(|e| ElfUtilError::format(path, e))?
            .header();

        debug!(
            path = %path.display(),
            class = header.ident.class.bits(),
            little_endian = header.ident.data.is_little_endian(),
            phoff = header.e_phoff,
            phnum = header.e_phnum,
            "Loaded ELF image"
        );

        Ok(Self { file, header })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn header(&self) -> &ElfHeader {
        &self.header
    }

    pub fn class(&self) -> ElfClass {
        self.header.ident.class
    }

    pub fn endianness(&self) -> ElfData {
        self.header.ident.data
    }

    /// Walk the program headers straight out of the mapping.
    pub fn segments(&self) -> Result<SegmentWalk<'_>> {
        SegmentWalk::new(self.file.as_bytes(), &self.header)
            .map_err(|e| ElfUtilError::format(self.path(), e))
    }
}

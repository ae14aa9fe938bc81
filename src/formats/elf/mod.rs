//! ELF (Executable and Linkable Format) program header reader
//!
//! A zero-copy reader for the file header and segment table. Section headers,
//! symbols and relocations are never touched.

pub mod headers;
pub mod layout;
pub mod segments;
pub mod types;
pub mod utils;

use headers::parse_header;
use segments::SegmentWalk;
pub use types::*;

/// ELF parser over borrowed bytes
#[derive(Debug, Clone, Copy)]
pub struct ElfParser<'data> {
    data: &'data [u8],
    header: ElfHeader,
}

impl<'data> ElfParser<'data> {
    /// Parse ELF from raw data
    pub fn parse(data: &'data [u8]) -> Result<Self> {
        let header = parse_header(data)?;

        Ok(Self { data, header })
    }

    /// Get ELF header
    pub fn header(&self) -> &ElfHeader {
        &self.header
    }

    /// Walk every program header
    pub fn segments(&self) -> Result<SegmentWalk<'data>> {
        SegmentWalk::new(self.data, &self.header)
    }
}

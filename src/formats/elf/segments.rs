//! Program header table traversal

use crate::formats::elf::layout::{Elf32, Elf64, HeaderLayout};
use crate::formats::elf::types::*;
use crate::formats::elf::utils::check_bounds;
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Lazy walk over a program header table of one class.
///
/// The table's extent is validated against the mapped bytes when the walk is
/// created; entries are then decoded one at a time, straight from the image.
#[derive(Debug, Clone)]
pub struct ProgramHeaders<'data, L: HeaderLayout> {
    data: &'data [u8],
    endian: ElfData,
    offset: usize,
    stride: usize,
    index: usize,
    count: usize,
    _layout: PhantomData<L>,
}

impl<'data, L: HeaderLayout> ProgramHeaders<'data, L> {
    /// Locate and bounds-check the program header table described by `header`.
    pub fn new(data: &'data [u8], header: &ElfHeader) -> Result<Self> {
        let count = usize::from(header.e_phnum);
        let stride = usize::from(header.e_phentsize);

        if count > 0 {
            let entry_size = L::CLASS.program_header_size();
            if stride < entry_size {
                return Err(ElfError::MalformedProgramHeaders(format!(
                    "e_phentsize {} is smaller than a {}-bit entry ({} bytes)",
                    stride,
                    L::CLASS.bits(),
                    entry_size
                )));
            }
            // The last entry only needs its own fields, not a full stride.
            let table_len = (count as u64 - 1) * stride as u64 + entry_size as u64;
            check_bounds(header.e_phoff, table_len, data.len())?;
        }

        Ok(Self {
            data,
            endian: header.ident.data,
            // In bounds after the check above, so it fits in usize.
            offset: usize::try_from(header.e_phoff).unwrap_or(usize::MAX),
            stride,
            index: 0,
            count,
            _layout: PhantomData,
        })
    }
}

impl<L: HeaderLayout> Iterator for ProgramHeaders<'_, L> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }
        let index = self.index;
        self.index += 1;

        let start = self.offset + index * self.stride;
        let entry = self.data.get(start..).unwrap_or_default();
        let segment = L::segment(entry, index, self.endian);
        if segment.is_err() {
            // Never yield past a bad entry.
            self.index = self.count;
        }
        Some(segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (0, Some(remaining))
    }
}

impl<L: HeaderLayout> FusedIterator for ProgramHeaders<'_, L> {}

/// A program header walk tagged with the image's class.
#[derive(Debug, Clone)]
pub enum SegmentWalk<'data> {
    Elf32(ProgramHeaders<'data, Elf32>),
    Elf64(ProgramHeaders<'data, Elf64>),
}

impl<'data> SegmentWalk<'data> {
    /// Start walking the program headers of `data`, dispatching on class.
    pub fn new(data: &'data [u8], header: &ElfHeader) -> Result<Self> {
        Ok(match header.ident.class {
            ElfClass::Elf32 => SegmentWalk::Elf32(ProgramHeaders::new(data, header)?),
            ElfClass::Elf64 => SegmentWalk::Elf64(ProgramHeaders::new(data, header)?),
        })
    }

    /// Only `PT_LOAD` entries.
    pub fn loads(self) -> impl Iterator<Item = Result<Segment>> + 'data {
        self.filter(|seg| seg.as_ref().map_or(true, Segment::is_load))
    }
}

impl Iterator for SegmentWalk<'_> {
    type Item = Result<Segment>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SegmentWalk::Elf32(walk) => walk.next(),
            SegmentWalk::Elf64(walk) => walk.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            SegmentWalk::Elf32(walk) => walk.size_hint(),
            SegmentWalk::Elf64(walk) => walk.size_hint(),
        }
    }
}

impl FusedIterator for SegmentWalk<'_> {}

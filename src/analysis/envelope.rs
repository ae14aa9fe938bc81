//! Load-address envelope of a single binary.
//!
//! The envelope is the smallest aligned window covering every segment that
//! occupies memory with some access permission. Its alignment is the largest
//! alignment requested by an executable segment.

use crate::error::{ElfUtilError, Result};
use crate::formats::elf::utils::{round_up, truncate};
use crate::formats::elf::{self, ElfError, Segment};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Per-binary load window, already shifted by the base address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadEnvelope {
    /// 1-based position of the file on the command line
    pub index: usize,
    pub path: String,
    pub base_address: u64,
    /// Truncated lowest physical address, before the base shift
    pub min_address: u64,
    /// Rounded-up end physical address, before the base shift
    pub max_address: u64,
    pub load_min: u64,
    pub load_max: u64,
    pub load_size: u64,
    pub alignment: u64,
}

/// Accumulates the raw bounds of qualifying segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeBuilder {
    min_address: Option<u64>,
    max_address: u64,
    alignment: u64,
}

impl EnvelopeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one segment in. Returns whether it contributed.
    pub fn add(&mut self, segment: &Segment) -> elf::Result<bool> {
        if segment.memory_size == 0 {
            trace!(index = segment.index, "Skipping empty segment");
            return Ok(false);
        }
        if !segment.flags.is_accessible() {
            trace!(index = segment.index, "Skipping segment without R/W/X");
            return Ok(false);
        }

        let end = segment.physical_end()?;
        self.min_address = Some(
            self.min_address
                .map_or(segment.physical_address, |min| min.min(segment.physical_address)),
        );
        self.max_address = self.max_address.max(end);
        if segment.is_executable() {
            self.alignment = self.alignment.max(segment.alignment);
        }

        debug!(
            index = segment.index,
            paddr = segment.physical_address,
            end = end,
            flags = %segment.flags,
            align = segment.alignment,
            "Segment contributes to envelope"
        );
        Ok(true)
    }

    /// Current raw `(min, max, alignment)`, if any segment contributed.
    pub fn bounds(&self) -> Option<(u64, u64, u64)> {
        match self.min_address {
            Some(min) if self.max_address != 0 && self.alignment != 0 => {
                Some((min, self.max_address, self.alignment))
            }
            _ => None,
        }
    }

    /// Round the bounds to the alignment and shift them by `base_address`.
    pub fn finish(self, path: &Path, index: usize, base_address: u64) -> Result<LoadEnvelope> {
        let (min, max, alignment) = self.bounds().ok_or_else(|| ElfUtilError::NoValidSegments {
            path: path.to_path_buf(),
        })?;

        if !alignment.is_power_of_two() {
            return Err(ElfUtilError::format(path, ElfError::InvalidAlignment(alignment)));
        }

        let min_address = truncate(min, alignment);
        let max_address = round_up(max, alignment).ok_or_else(|| {
            ElfUtilError::format(
                path,
                ElfError::AddressOverflow {
                    address: max,
                    size: alignment - 1,
                },
            )
        })?;

        if base_address > min_address {
            warn!(
                path = %path.display(),
                base_address,
                min_address,
                "Base address lies above the image; load addresses wrap"
            );
        }

        Ok(LoadEnvelope {
            index,
            path: path.display().to_string(),
            base_address,
            min_address,
            max_address,
            load_min: min_address.wrapping_sub(base_address),
            load_max: max_address.wrapping_sub(base_address),
            load_size: max_address - min_address,
            alignment,
        })
    }
}

/// Compute the load envelope of one binary from its program headers.
pub fn compute_envelope<I>(
    segments: I,
    path: &Path,
    index: usize,
    base_address: u64,
) -> Result<LoadEnvelope>
where
    I: IntoIterator<Item = elf::Result<Segment>>,
{
    let mut builder = EnvelopeBuilder::new();
    for segment in segments {
        let segment = segment.map_err(|e| ElfUtilError::format(path, e))?;
        builder
            .add(&segment)
            .map_err(|e| ElfUtilError::format(path, e))?;
    }
    builder.finish(path, index, base_address)
}

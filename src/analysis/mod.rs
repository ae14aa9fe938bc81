//! Analyses built on the program header walk.

pub mod envelope;
pub mod overlap;

pub use envelope::{compute_envelope, EnvelopeBuilder, LoadEnvelope};
pub use overlap::{Overlap, OverlapDetector, OverlapMode};

use crate::error::{ElfUtilError, Result};
use crate::formats::elf::segments::SegmentWalk;
use std::path::Path;
use tracing::trace;

/// Add the physical range of every `PT_LOAD` segment to `detector`.
///
/// Returns the number of ranges added. The owner of each range is the
/// displayed `path`. A file whose table fails to decode adds nothing.
pub fn collect_load_ranges(
    segments: SegmentWalk<'_>,
    path: &Path,
    detector: &mut OverlapDetector,
) -> Result<usize> {
    let owner = path.display().to_string();
    let mut ranges = Vec::new();
    for segment in segments.loads() {
        let segment = segment.map_err(|e| ElfUtilError::format(path, e))?;
        let end = segment
            .physical_end()
            .map_err(|e| ElfUtilError::format(path, e))?;
        trace!(
            owner = %owner,
            index = segment.index,
            start = segment.physical_address,
            end,
            "Collected LOAD range"
        );
        ranges.push((segment.physical_address, end));
    }

    for &(start, end) in &ranges {
        detector.add(start, end, owner.as_str());
    }
    Ok(ranges.len())
}

//! AddressRange type for physical placement checks.
//!
//! A half-open `[start, end)` region of physical memory, tagged with the
//! binary that contributed it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open contiguous physical memory region owned by one binary.
///
/// No validation is performed on construction; `start > end` is representable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AddressRange {
    /// The starting address of the range (inclusive)
    pub start: u64,
    /// The end address of the range (exclusive)
    pub end: u64,
    /// Name of the binary the range came from
    pub owner: String,
}

impl AddressRange {
    pub fn new(start: u64, end: u64, owner: impl Into<String>) -> Self {
        Self {
            start,
            end,
            owner: owner.into(),
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}-{:#x}", self.owner, self.start, self.end)
    }
}

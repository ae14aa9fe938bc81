//! Physical address overlap detection across binaries.
//!
//! Ranges from every input are collected first and checked once all files
//! have been processed. Two strategies are available:
//!
//! - [`OverlapMode::Adjacent`] compares each range only with its successor in
//!   start order. It is cheap but misses a short range nested inside an
//!   earlier long one whenever a third range starts between them.
//! - [`OverlapMode::Exhaustive`] sweeps with an active set and reports every
//!   overlapping pair exactly once.

use crate::core::AddressRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Which pairs of ranges are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlapMode {
    /// Only neighbours in start order
    #[default]
    Adjacent,
    /// Every pair
    Exhaustive,
}

/// Two ranges that share at least one address; `first` sorts before `second`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlap {
    pub first: AddressRange,
    pub second: AddressRange,
}

impl fmt::Display for Overlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "overlap {} vs. {}", self.first, self.second)
    }
}

/// Collection of address ranges gathered over one run.
#[derive(Debug, Clone, Default)]
pub struct OverlapDetector {
    ranges: Vec<AddressRange>,
}

impl OverlapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one range. No validation is done.
    pub fn add(&mut self, start: u64, end: u64, owner: impl Into<String>) {
        self.ranges.push(AddressRange::new(start, end, owner));
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Ranges in insertion order.
    pub fn ranges(&self) -> &[AddressRange] {
        &self.ranges
    }

    /// Sort the ranges and report overlaps using `mode`.
    pub fn finish(self, mode: OverlapMode) -> Vec<Overlap> {
        match mode {
            OverlapMode::Adjacent => self.report(),
            OverlapMode::Exhaustive => self.report_exhaustive(),
        }
    }

    /// Report overlaps between neighbours in start order.
    pub fn report(self) -> Vec<Overlap> {
        let ranges = self.sorted();
        let overlaps: Vec<Overlap> = ranges
            .windows(2)
            .filter(|pair| pair[1].start < pair[0].end)
            .map(|pair| Overlap {
                first: pair[0].clone(),
                second: pair[1].clone(),
            })
            .collect();

        debug!(
            ranges = ranges.len(),
            overlaps = overlaps.len(),
            "Adjacent overlap check done"
        );
        overlaps
    }

    /// Report every overlapping pair.
    ///
    /// Findings are ordered by the later range's start, then by the earlier
    /// range's position in start order.
    pub fn report_exhaustive(self) -> Vec<Overlap> {
        let ranges = self.sorted();
        let mut active: Vec<&AddressRange> = Vec::new();
        let mut overlaps = Vec::new();

        for current in &ranges {
            active.retain(|open| open.end > current.start);
            overlaps.extend(active.iter().map(|open| Overlap {
                first: (*open).clone(),
                second: current.clone(),
            }));
            active.push(current);
        }

        debug!(
            ranges = ranges.len(),
            overlaps = overlaps.len(),
            "Exhaustive overlap check done"
        );
        overlaps
    }

    fn sorted(self) -> Vec<AddressRange> {
        let mut ranges = self.ranges;
        // Stable: equal starts keep insertion order.
        ranges.sort_by_key(|r| r.start);
        ranges
    }
}

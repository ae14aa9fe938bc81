//! Inspect ELF program headers to compute load-address envelopes and detect
//! physical address overlaps between several binaries.
//!
//! The crate reads only the ELF file header and the program header table.
//! [`image::ElfImage`] maps a file and hands out a lazy segment walk; the
//! [`analysis`] module consumes that walk; [`runner::Runner`] drives both over
//! a list of files.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod formats;
pub mod image;
pub mod io;
pub mod logging;
pub mod report;
pub mod runner;

pub use error::{ElfUtilError, Result};

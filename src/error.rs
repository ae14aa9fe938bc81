//! Error types for elf-util.
//!
//! Each layer has its own error (`io::error::IoError`, `formats::elf::ElfError`);
//! this module ties them to the file they occurred in so that every failure
//! can be reported as a single line.

use crate::formats::elf::ElfError;
use crate::io::error::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for elf-util operations.
#[derive(Debug, Error)]
pub enum ElfUtilError {
    /// Open, stat or mmap failures
    #[error(transparent)]
    Io(#[from] IoError),

    /// Bad magic, class or encoding, or a malformed program header table
    #[error("'{}': {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: ElfError,
    },

    /// Envelope analysis found no qualifying segment
    #[error("'{}': No valid PHDR found", .path.display())]
    NoValidSegments { path: PathBuf },

    /// Bad flag value or no input files
    #[error("{0}")]
    Argument(String),
}

impl ElfUtilError {
    pub fn format(path: impl Into<PathBuf>, source: ElfError) -> Self {
        ElfUtilError::Format {
            path: path.into(),
            source,
        }
    }

    /// Short category name, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ElfUtilError::Io(_) => "io",
            ElfUtilError::Format { .. } => "format",
            ElfUtilError::NoValidSegments { .. } => "no-valid-segments",
            ElfUtilError::Argument(_) => "argument",
        }
    }
}

/// Result type alias for elf-util operations
pub type Result<T> = std::result::Result<T, ElfUtilError>;

//! Custom error types for the I/O module.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Could not open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not get size of '{}': {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not mmap '{}': {source}", .path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' is {found} bytes, exceeding the maximum allowed size of {limit} bytes", .path.display())]
    FileTooLarge { path: PathBuf, limit: u64, found: u64 },
}

pub type Result<T> = std::result::Result<T, IoError>;

//! Command line surface.

use crate::analysis::OverlapMode;
use crate::config::{parse_base_address, OutputFormat, RunConfig};
use crate::error::{ElfUtilError, Result};
use crate::io::IOLimits;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Inspect ELF program headers: load windows and physical overlaps.
#[derive(Parser, Debug)]
#[command(name = "elf-util", version, about)]
pub struct Cli {
    /// Print the load address envelope of every file.
    #[arg(long)]
    pub show_infos: bool,

    /// Check the LOAD segments of all files for overlapping physical ranges.
    #[arg(long)]
    pub check_overlap: bool,

    /// Base address subtracted from reported load addresses (hex with 0x, octal with 0, or decimal).
    #[arg(long, value_name = "ADDR")]
    pub base_addr: Option<String>,

    /// Which range pairs the overlap check compares.
    #[arg(long, value_enum, default_value_t = OverlapMode::Adjacent)]
    pub overlap_mode: OverlapMode,

    /// Output format for reports.
    #[arg(long, value_enum, default_value_t = OutputFormat::Env)]
    pub format: OutputFormat,

    /// Refuse to map files larger than this many bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Emit diagnostics as JSON on stderr.
    #[arg(long)]
    pub log_json: bool,

    /// Increase diagnostic verbosity on stderr (repeatable).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// ELF binaries to inspect.
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Cli {
    /// Validated input files; at least one is required.
    pub fn input_files(&self) -> Result<&[PathBuf]> {
        if self.files.is_empty() {
            return Err(ElfUtilError::Argument("No ELF binary given.".to_string()));
        }
        Ok(&self.files)
    }
}

impl TryFrom<&Cli> for RunConfig {
    type Error = ElfUtilError;

    fn try_from(cli: &Cli) -> Result<Self> {
        let base_address = cli
            .base_addr
            .as_deref()
            .map(parse_base_address)
            .transpose()?
            .unwrap_or(0);

        let mut io = IOLimits::default();
        if let Some(max) = cli.max_file_size {
            io.max_file_size = max;
        }

        Ok(RunConfig {
            show_infos: cli.show_infos,
            check_overlap: cli.check_overlap,
            base_address,
            overlap_mode: cli.overlap_mode,
            output_format: cli.format,
            io,
        })
    }
}

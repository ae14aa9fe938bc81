//! Run configuration.
//!
//! Collects every knob of one invocation in a single value that is threaded
//! through the runner, with defaults matching the plain command line.

use crate::analysis::OverlapMode;
use crate::error::{ElfUtilError, Result};
use crate::io::IOLimits;
use serde::{Deserialize, Serialize};

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Shell-sourceable `KEY_N=value` lines
    #[default]
    Env,
    /// One JSON object per line
    Json,
}

/// Master configuration for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Print the load envelope of every file.
    pub show_infos: bool,
    /// Check LOAD ranges of all files for physical overlaps.
    pub check_overlap: bool,
    /// Subtracted from every reported load address.
    pub base_address: u64,
    pub overlap_mode: OverlapMode,
    pub output_format: OutputFormat,
    /// I/O limits for mapping input files.
    pub io: IOLimits,
}

impl RunConfig {
    /// True when at least one analysis produces output.
    pub fn has_analysis(&self) -> bool {
        self.show_infos || self.check_overlap
    }
}

/// Parse a numeric address the way `strtoull(text, .., 0)` does.
///
/// Leading C whitespace and one `+`/`-` sign are skipped. `0x`/`0X` then
/// selects hex, a leading `0` octal, anything else decimal. A minus negates
/// modulo 2^64 and values too large saturate at `u64::MAX`. The rest of the
/// string must be digits; an empty string converts nothing and yields 0.
pub fn parse_base_address(text: &str) -> Result<u64> {
    let invalid = || ElfUtilError::Argument(format!("Invalid number given: '{}'", text));

    if text.is_empty() {
        return Ok(0);
    }

    let rest = text.trim_start_matches([' ', '\t', '\n', '\x0b', '\x0c', '\r']);
    let (negative, unsigned) = match rest.strip_prefix('-') {
        Some(tail) => (true, tail),
        None => (false, rest.strip_prefix('+').unwrap_or(rest)),
    };

    let (digits, radix) = if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        (hex, 16)
    } else if unsigned.len() > 1 && unsigned.starts_with('0') {
        (&unsigned[1..], 8)
    } else {
        (unsigned, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    // Digits are validated, so the only possible failure is overflow.
    Ok(match u64::from_str_radix(digits, radix) {
        Ok(value) if negative => value.wrapping_neg(),
        Ok(value) => value,
        Err(_) => u64::MAX,
    })
}

//! Output rendering.
//!
//! Results go to stdout through [`ReportWriter`]; failures go to stderr through
//! [`Reporter`], which carries the program name used as message prefix.

use crate::analysis::{LoadEnvelope, Overlap};
use crate::config::OutputFormat;
use serde::Serialize;
use std::fmt::Display;
use std::io::{self, Write};

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record<'a> {
    Envelope(&'a LoadEnvelope),
    Overlap(&'a Overlap),
}

/// Writes analysis results in the configured format.
#[derive(Debug)]
pub struct ReportWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn write_envelope(&mut self, env: &LoadEnvelope) -> io::Result<()> {
        match self.format {
            OutputFormat::Env => {
                let n = env.index;
                writeln!(self.out, "FILEPATH_{}=\"{}\"", n, env.path)?;
                writeln!(self.out, "BASE_ADDR_{}={:#x}", n, env.base_address)?;
                writeln!(self.out, "LOAD_ADDR_MIN_{}={:#x}", n, env.load_min)?;
                writeln!(self.out, "LOAD_ADDR_MAX_{}={:#x}", n, env.load_max)?;
                writeln!(self.out, "LOAD_SIZE_{}={:#x}", n, env.load_size)?;
                writeln!(self.out, "ALIGNMENT_{}={:#x}", n, env.alignment)
            }
            OutputFormat::Json => self.write_json(&Record::Envelope(env)),
        }
    }

    pub fn write_overlap(&mut self, overlap: &Overlap) -> io::Result<()> {
        match self.format {
            OutputFormat::Env => writeln!(self.out, "{}", overlap),
            OutputFormat::Json => self.write_json(&Record::Overlap(overlap)),
        }
    }

    fn write_json(&mut self, record: &Record<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Error reporting context: every message is prefixed with the program name.
#[derive(Debug)]
pub struct Reporter<E: Write> {
    program: String,
    sink: E,
}

impl<E: Write> Reporter<E> {
    pub fn new(program: impl Into<String>, sink: E) -> Self {
        Self {
            program: program.into(),
            sink,
        }
    }

    /// Write `<program>: <message>`.
    pub fn error(&mut self, message: &dyn Display) {
        // Nothing sensible is left to do if stderr itself fails.
        let _ = writeln!(self.sink, "{}: {}", self.program, message);
    }

    pub fn into_inner(self) -> E {
        self.sink
    }
}

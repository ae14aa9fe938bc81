//! Sequential driver over the input files.
//!
//! Each file is mapped, analysed and released before the next one is opened.
//! A failing file is reported and skipped; the run keeps going and the
//! failure is reflected in the final [`RunSummary`].

use crate::analysis::{collect_load_ranges, compute_envelope, LoadEnvelope, OverlapDetector};
use crate::config::RunConfig;
use crate::error::{ElfUtilError, Result};
use crate::image::ElfImage;
use crate::report::{ReportWriter, Reporter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span};

/// Outcome of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub failed: Vec<PathBuf>,
    pub envelopes: usize,
    pub overlaps: usize,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Process exit status: 0 when every file was handled, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Runs the configured analyses over a list of files.
///
/// Per-file failures go through the borrowed [`Reporter`] and nowhere else;
/// tracing only repeats them at debug level.
pub struct Runner<'cfg, 'rep, O: Write, E: Write> {
    config: &'cfg RunConfig,
    out: ReportWriter<O>,
    reporter: &'rep mut Reporter<E>,
    detector: OverlapDetector,
    summary: RunSummary,
}

impl<'cfg, 'rep, O: Write, E: Write> Runner<'cfg, 'rep, O, E> {
    pub fn new(config: &'cfg RunConfig, out: O, reporter: &'rep mut Reporter<E>) -> Self {
        Self {
            config,
            out: ReportWriter::new(out, config.output_format),
            reporter,
            detector: OverlapDetector::new(),
            summary: RunSummary::default(),
        }
    }

    /// Process every file in order, then emit the overlap report.
    ///
    /// Only a failure to write to stdout aborts the run.
    pub fn run<P: AsRef<Path>>(mut self, files: &[P]) -> io::Result<RunSummary> {
        if !self.config.has_analysis() {
            info!("Neither --show-infos nor --check-overlap given; only validating inputs");
        }

        for (position, path) in files.iter().enumerate() {
            let path = path.as_ref();
            let index = position + 1;
            let span = info_span!("file", index, path = %path.display());
            let _guard = span.enter();

            self.summary.files += 1;
            if let Err(err) = self.process(path, index) {
                match err {
                    FileError::Analysis(err) => self.fail(path, &err),
                    FileError::Output(err) => return Err(err),
                }
            }
        }

        if self.config.check_overlap {
            let overlaps = self.detector.finish(self.config.overlap_mode);
            for overlap in &overlaps {
                self.out.write_overlap(overlap)?;
            }
            self.summary.overlaps = overlaps.len();
        }
        self.out.flush()?;

        info!(
            files = self.summary.files,
            failed = self.summary.failed.len(),
            overlaps = self.summary.overlaps,
            "Run finished"
        );
        Ok(self.summary)
    }

    fn process(&mut self, path: &Path, index: usize) -> std::result::Result<(), FileError> {
        // The image, and with it the mapping, is dropped when this returns.
        let image = ElfImage::open(path, &self.config.io)?;
        info!(class = image.class().bits(), "Processing");

        let mut first_error = None;

        if self.config.show_infos {
            match envelope_of(&image, index, self.config.base_address) {
                Ok(env) => {
                    self.out.write_envelope(&env).map_err(FileError::Output)?;
                    self.summary.envelopes += 1;
                }
                Err(err) => first_error = Some(err),
            }
        }

        if self.config.check_overlap {
            let collected = image
                .segments()
                .and_then(|walk| collect_load_ranges(walk, path, &mut self.detector));
            if let Err(err) = collected {
                // The same table fault would be reported twice otherwise.
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        }

        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn fail(&mut self, path: &Path, err: &ElfUtilError) {
        debug!(kind = err.kind(), error = %err, "File skipped");
        self.reporter.error(err);
        self.summary.failed.push(path.to_path_buf());
    }
}

fn envelope_of(image: &ElfImage, index: usize, base_address: u64) -> Result<LoadEnvelope> {
    compute_envelope(image.segments()?, image.path(), index, base_address)
}

enum FileError {
    Analysis(ElfUtilError),
    Output(io::Error),
}

impl From<ElfUtilError> for FileError {
    fn from(err: ElfUtilError) -> Self {
        FileError::Analysis(err)
    }
}

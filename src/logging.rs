//! Logging and tracing infrastructure for elf-util.
//!
//! Diagnostics go to stderr through the tracing crate so that stdout carries
//! only the reports. `RUST_LOG` takes precedence over the verbosity flag.
//! At the default level only warnings are shown; per-file failures are
//! printed by the reporter, not logged at that level.

use std::io::IsTerminal;
use std::sync::Once;
use tracing::debug;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static INIT: Once = Once::new();

/// Default filter directive for a `-v` count.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)))
}

/// Initialize the global tracing subscriber.
///
/// This should be called once at program startup.
/// Subsequent calls are ignored.
pub fn init_tracing(verbosity: u8) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_span_events(FmtSpan::NONE)
            .with_target(verbosity >= 3)
            .with_file(verbosity >= 3)
            .with_line_number(verbosity >= 3);

        let _ = tracing_subscriber::registry()
            .with(env_filter(verbosity))
            .with(fmt_layer)
            .try_init();

        debug!("elf-util tracing initialized");
    });
}

/// Initialize tracing with JSON output for structured logging.
pub fn init_tracing_json(verbosity: u8) {
    INIT.call_once(|| {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_current_span(true);

        let _ = tracing_subscriber::registry()
            .with(env_filter(verbosity))
            .with(fmt_layer)
            .try_init();

        debug!("elf-util tracing initialized (JSON mode)");
    });
}

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use elf_util::cli::Cli;
use elf_util::config::RunConfig;
use elf_util::logging;
use elf_util::report::Reporter;
use elf_util::runner::Runner;
use std::path::Path;
use std::process::ExitCode;

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "elf-util".to_string())
}

fn main() -> ExitCode {
    let mut reporter = Reporter::new(program_name(), std::io::stderr().lock());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    if cli.log_json {
        logging::init_tracing_json(cli.verbose);
    } else {
        logging::init_tracing(cli.verbose);
    }

    let setup = cli
        .input_files()
        .and_then(|files| Ok((files, RunConfig::try_from(&cli)?)));
    let (files, config) = match setup {
        Ok(setup) => setup,
        Err(err) => {
            reporter.error(&err);
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout().lock();
    let summary = Runner::new(&config, stdout, &mut reporter)
        .run(files)
        .context("failed to write report to stdout");

    match summary {
        Ok(summary) => ExitCode::from(summary.exit_code()),
        Err(err) => {
            reporter.error(&format_args!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}

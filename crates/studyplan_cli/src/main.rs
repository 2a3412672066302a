//! Command-line entry point for planner export migration.
//!
//! # Responsibility
//! - Parse the input/output paths.
//! - Run one conversion and map its outcome to an exit code.
//!
//! Usage:
//!   studyplan-migrate `<input.json>` `<output.json>`

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Convert a legacy study planner export into the curriculum schema.
#[derive(Debug, Parser)]
#[command(name = "studyplan-migrate", version)]
struct Cli {
    /// Legacy (or already migrated) planner export
    input: PathBuf,
    /// Where to write the migrated document
    output: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = studyplan_core::init_logging(studyplan_core::default_log_level()) {
        eprintln!("warning: logging disabled: {err}");
    }

    match studyplan_core::convert_file(&cli.input, &cli.output) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_exit module=cli status=error error={}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

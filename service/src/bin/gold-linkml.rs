//! `gold-linkml` command-line interface
//!
//! Reads a GOLD ecosystem path table and prints the compiled `LinkML` schema.

use linkml_service::cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    cli::run()?;
    Ok(())
}

//! Emit one structured log record from the shell, through the same console
//! and export handlers an application would use.
//!
//! Usage:
//!   splatlog [-v...] [--config FILE] [--export FILE] [--name NAME] LEVEL MSG [KEY=VALUE...]
//!
//! Examples:
//!   splatlog info "deployed {service}" service=api replicas=3
//!   splatlog --export ~/logs/ops.jsonl warning "disk at {pct}%" pct=91

use clap::Parser;
use splatlog::Logging;
use splatlog::cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli, &Logging::global()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("splatlog: {e}");
            ExitCode::FAILURE
        }
    }
}

//! Main entry point for plan-gate.
//!
//! Parses arguments, runs the gate once and maps the verdict to an exit code.

use std::process::ExitCode;

use clap::Parser;

use plan_gate::cli::{self, Args, GateConfig};
use plan_gate::utils;

fn main() -> ExitCode {
    // Held until main returns so the log file gets flushed
    let _log_guard = utils::logger::init_logging();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => return cli::usage_error(e),
    };

    let verdict = cli::run(&GateConfig::from(args));
    cli::report(&verdict)
}

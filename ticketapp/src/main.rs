//! `ticketapp` entry-point: loads settings, wires adapters, runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use tokio::runtime::Builder;

use ticketapp::config::AppSettings;
use ticketapp::inbound::cli::{Cli, CliError};
use ticketapp::startup::{build_app, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match AppSettings::load_from_env() {
        Ok(settings) => settings,
        Err(err) => return fail(&err.to_string(), 1),
    };
    init_tracing(settings.log_json);

    let runtime = match Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => return fail(&format!("create Tokio runtime: {err}"), 1),
    };

    let app = match build_app(&settings, cli.data_dir.as_deref()) {
        Ok(app) => app,
        Err(err) => return fail(&err.to_string(), 1),
    };

    let mut stdout = io::stdout().lock();
    match runtime.block_on(app.run(cli.command, &mut stdout)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(&err),
    }
}

fn report(err: &CliError) -> ExitCode {
    if let Err(write_err) = err.report(io::stderr().lock()) {
        drop(write_err);
    }
    ExitCode::from(err.exit_code())
}

fn fail(message: &str, code: u8) -> ExitCode {
    if let Err(write_err) = writeln!(io::stderr().lock(), "error: {message}") {
        drop(write_err);
    }
    ExitCode::from(code)
}

//! Rapp inspector binary
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`);
//! reports go to stdout.

use std::{
    io::{self, Write},
    process::ExitCode,
};

use clap::Parser;
use rapp_inspect::{Cli, InspectError, run};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut out = io::stdout().lock();
    let result = run(&cli.command, &mut out).and_then(|()| out.flush().map_err(InspectError::from));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        },
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).try_init();
}

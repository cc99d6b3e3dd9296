//! CLI binary for `todo_file`.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use todo_file::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = run(cli, Path::new("."));

    for line in &output.stdout {
        println!("{line}");
    }
    for line in &output.stderr {
        eprintln!("{line}");
    }

    output.exit_code
}

/// Log to stderr so stdout stays clean JSON. `RUST_LOG` overrides the level.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "todo_file=debug" } else { "todo_file=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

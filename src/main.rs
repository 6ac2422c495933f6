//! WOUNDMET CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! extraction on one mask, and exit with appropriate status.
//! For programmatic use, prefer the library API (`woundmet::api`).

use clap::Parser;

mod cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();
    cli::run(args)
}

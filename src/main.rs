//! # Sane Amalgamate CLI
//!
//! Binary entry point for the `sane-amalgamate` command-line tool.
//!
//! Its responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Setting up logging and color output.
//! - Executing the selected command and reporting top-level errors.
//!
//! The amalgamation logic lives in the `sane_amalgamate` library crate; the
//! binary is a thin wrapper around it.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}

//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use sane_amalgamate::output::OutputConfig;

use crate::commands;

/// Sane Amalgamate - Build single-file C++ libraries
#[derive(Parser, Debug)]
#[command(name = "sane-amalgamate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(
        long,
        global = true,
        value_name = "WHEN",
        default_value = "auto",
        value_parser = ["always", "never", "auto"]
    )]
    color: String,

    /// Set log level (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        default_value = "warn",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build single-file libraries
    Build(commands::build::BuildArgs),

    /// List libraries and their dependencies
    Ls(commands::ls::LsArgs),

    /// Show the inlining order of a library
    Order(commands::order::OrderArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let output = OutputConfig::from_env_and_flag(&self.color);
        console::set_colors_enabled(output.use_color);
        console::set_colors_enabled_stderr(output.use_color);

        match self.command {
            Commands::Build(args) => commands::build::execute(args, &output),
            Commands::Ls(args) => commands::ls::execute(args, &output),
            Commands::Order(args) => commands::order::execute(args, &output),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed when running under a test harness
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

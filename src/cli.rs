//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// tagver - Deterministic build versions and container image tags
#[derive(Parser, Debug)]
#[command(name = "tagver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve every workspace project to its repository, tag and image
    Resolve(commands::resolve::ResolveArgs),

    /// Print the computed version tag for one or more project directories
    Version(commands::version::VersionArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(&self.log_level),
        )
        .init();

        match self.command {
            Commands::Resolve(args) => commands::resolve::execute(args),
            Commands::Version(args) => commands::version::execute(args),
        }
    }
}

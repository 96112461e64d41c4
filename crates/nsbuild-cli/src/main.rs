//! nsbuild CLI
//!
//! The command-line interface for namespace sub-package builds: version
//! bumping with release tags, and effective-manifest resolution.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use commands::TagOptions;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Bump {
            action,
            tag,
            dirty,
            no_tag_prefix,
            manifest,
        } => commands::run_bump(
            &manifest,
            action,
            TagOptions {
                create: tag,
                allow_dirty: dirty,
                prefix: !no_tag_prefix,
            },
        ),
        Commands::Resolve {
            namespace,
            manifest,
        } => commands::run_resolve(&manifest, &namespace),
    }
}

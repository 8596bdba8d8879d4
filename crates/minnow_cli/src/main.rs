//! minnow CLI
//!
//! Command-line tools for inspecting minnow store directories.
//!
//! # Commands
//!
//! - `inspect` - List record files and directory statistics
//! - `verify` - Check every record file is readable, UTF-8, non-blank

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// minnow command-line store tools.
#[derive(Parser)]
#[command(name = "minnow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List record files and basic statistics for a store directory
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check that every record file is readable, UTF-8 text, non-blank
    Verify,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Store path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Store path required for verify")?;
            let report = commands::verify::run(&path)?;
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("minnow CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

//! Refview CLI - asset reference graphs from the command line.
//!
//! Loads a registry snapshot and prints referencer/dependency graphs for a
//! root asset, with the same depth, breadth, and class filtering the embedded
//! viewer applies.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

mod cli;

/// Refview: bounded asset reference graphs.
#[derive(Parser)]
#[command(name = "refview")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Registry snapshot JSON file
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the full reference graph for a root asset
    Graph {
        /// Root asset identifiers (e.g. "/Game/Hero", "Map:Hub")
        #[arg(required = true)]
        roots: Vec<String>,

        /// Maximum traversal depth in hops from the root
        #[arg(short, long)]
        depth: Option<u32>,

        /// Maximum explicit children per node before collapsing
        #[arg(short, long)]
        breadth: Option<usize>,

        /// Restrict traversal to packages in a named collection
        #[arg(short, long)]
        collection: Option<String>,

        /// Include native /Script packages
        #[arg(long)]
        show_natives: bool,

        /// Traverse hard references only
        #[arg(long)]
        hard_only: bool,
    },

    /// List direct referencers of an asset
    Referencers {
        /// Asset identifier
        root: String,
    },

    /// List direct dependencies of an asset
    Dependencies {
        /// Asset identifier
        root: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let Some(snapshot) = cli.snapshot else {
        eprintln!("{}: --snapshot <FILE> is required", "error".red().bold());
        return ExitCode::FAILURE;
    };

    // Run the appropriate command
    let result = match cli.command {
        Commands::Graph {
            roots,
            depth,
            breadth,
            collection,
            show_natives,
            hard_only,
        } => cli::graph::run(
            &snapshot,
            &roots,
            depth,
            breadth,
            collection.as_deref(),
            show_natives,
            hard_only,
        ),
        Commands::Referencers { root } => cli::referencers::run(&snapshot, &root),
        Commands::Dependencies { root } => cli::dependencies::run(&snapshot, &root),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e}", "error".red().bold());
            // Show cause chain for nested errors
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                eprintln!("  {}: {cause}", "caused by".dimmed());
                source = std::error::Error::source(cause);
            }
            ExitCode::FAILURE
        }
    }
}

//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Generate a cross-linked HTML reference from annotated C++ headers
#[derive(Parser, Debug)]
#[command(name = "headlamp")]
#[command(about = "Generate a cross-linked HTML reference from annotated C++ headers")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the HTML reference for a source tree
    Build {
        /// Directory the config's file paths are relative to
        source_dir: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, default_value = "./headlamp-docs")]
        output: PathBuf,

        /// Tab stop width for tab expansion
        #[arg(long)]
        tab_width: Option<usize>,

        /// Print a line per written file
        #[arg(short, long)]
        verbose: bool,
    },

    /// Pre-scan one header and list its sections
    Inspect {
        /// Header file to scan
        file: PathBuf,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

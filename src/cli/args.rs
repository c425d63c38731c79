//! Command-line argument definitions
//!
//! This module defines all CLI arguments using clap.

use clap::Parser;
use std::path::PathBuf;

/// Merge photos from a source folder into a target folder, skipping content that is already there
#[derive(Parser, Debug)]
#[command(name = "photomerge")]
#[command(author = "Vihaan Reddy M")]
#[command(version)]
#[command(about = "Merge photos into a target folder without duplicates or overwrites", long_about = None)]
pub struct Args {
    /// Source directory to merge from
    #[arg(short, long, value_name = "DIR", required_unless_present = "init_config")]
    pub source: Option<PathBuf>,

    /// Target directory to merge into
    #[arg(short, long, value_name = "DIR", required_unless_present = "init_config")]
    pub target: Option<PathBuf>,

    /// Mirror log output to the console
    #[arg(short, long)]
    pub verbose: bool,

    /// Only look at files directly inside the source directory
    #[arg(short = 'n', long = "non-recursive", alias = "non_recursive")]
    pub non_recursive: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace (overrides config)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Write the example configuration to the standard location and exit
    #[arg(long, conflicts_with_all = ["source", "target"])]
    pub init_config: bool,
}

impl Args {
    /// Recursive search is the default
    pub fn recursive(&self) -> bool {
        !self.non_recursive
    }
}

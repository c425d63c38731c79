//! CLI module for photomerge
//!
//! This module contains all command-line interface related code including
//! argument parsing, the merge command handler and console output.
//!
//! # Submodules
//!
//! - `args` - Command-line argument definitions using clap
//! - `commands` - Command handler implementations
//! - `progress` - Summary output and the log writer

pub mod args;
pub mod commands;
pub mod progress;

pub use args::Args;
pub use commands::{handle_init_config, report_config, run_command};
pub use progress::DualWriter;

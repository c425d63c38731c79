//! photomerge - CLI entry point
//!
//! Merges photos from a source folder into a target folder without creating
//! duplicates or overwriting anything already there.
//!
//! This binary is a thin wrapper around the library, handling argument parsing,
//! logging setup, and command dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use photomerge::cli::{self, progress::print_error, Args, DualWriter};
use photomerge::core::config::{Config, ConfigSource, LoggingConfig};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.init_config {
        return match cli::handle_init_config() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                print_error(&format!("{:#}", e));
                ExitCode::FAILURE
            }
        };
    }

    // The config also configures the logger, so it is read first and
    // reported once logging is up.
    let source = ConfigSource::resolve(args.config.as_deref());
    let loaded = Config::load(source.path());

    let mut logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    if let Some(ref level) = args.log_level {
        logging.level = level.clone();
    }

    if let Err(e) = init_logger(&logging, args.verbose) {
        print_error(&format!("{:#}", e));
        return ExitCode::FAILURE;
    }

    info!("photomerge v{}", photomerge::VERSION);
    info!("============================");

    match run(&args, &source, loaded) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(
    args: &Args,
    source: &ConfigSource,
    loaded: Result<Config, photomerge::core::config::ConfigError>,
) -> Result<()> {
    let config = cli::report_config(source, loaded)?;
    cli::run_command(args, &config)
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Log to the file always; mirror to stderr only when verbose
fn init_logger(logging: &LoggingConfig, verbose: bool) -> Result<()> {
    if let Some(parent) = logging.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&logging.log_file)
        .with_context(|| format!("Failed to open log file: {}", logging.log_file.display()))?;

    Builder::new()
        .filter_level(parse_level(&logging.level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {} {}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(DualWriter {
            console: verbose.then(std::io::stderr),
            file: log_file,
        })))
        .init();

    Ok(())
}

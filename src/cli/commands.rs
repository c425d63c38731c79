//! Command handler implementations
//!
//! Wires configuration, path resolution and the merge engine together for a
//! single run of the binary.

use crate::cli::progress::{format_bytes, print_success, print_summary};
use crate::cli::Args;
use crate::core::config::{init_config, Config, ConfigError, ConfigSource};
use crate::core::events::LogSink;
use crate::core::merge::{MergeEngine, MergeStats};
use crate::core::paths::resolve_paths;
use anyhow::{Context, Result};
use log::{error, info};
use std::time::Instant;

/// Merge `--source` into `--target` and print the summary
pub fn run_command(args: &Args, config: &Config) -> Result<()> {
    let start = Instant::now();
    let stats = run_merge(args, config)?;
    print_summary(&stats, start.elapsed());

    Ok(())
}

/// Log where the configuration came from and pass the loaded result on.
///
/// The file is read before the logger exists (it configures the logger), so
/// reporting happens here. A missing file is an error; there is no fallback
/// to built-in defaults.
pub fn report_config(
    source: &ConfigSource,
    loaded: std::result::Result<Config, ConfigError>,
) -> Result<Config> {
    match source {
        ConfigSource::Custom(path) => info!("Using custom config file: {}", path.display()),
        ConfigSource::Default(path) => {
            info!("Using default config file");
            log::debug!("Default config path: {}", path.display());
        }
    }

    loaded.map_err(|e| {
        error!("{}", e);
        anyhow::Error::new(e)
    })
}

/// Validate the roots, build the baseline and merge
pub fn run_merge(args: &Args, config: &Config) -> Result<MergeStats> {
    let extensions = config.extension_filter();
    info!("Allowed extensions: {:?}", extensions.sorted());
    let ignored = config.ignore_set();
    info!("Ignored files: {:?}", ignored.sorted());

    let source = args.source.as_deref().context("--source is required")?;
    let target = args.target.as_deref().context("--target is required")?;

    let (source, target) = resolve_paths(source, target)?;
    info!("Using source directory: {}", source.path().display());
    info!("Using target directory: {}", target.path().display());

    let engine = MergeEngine::new(source, target, extensions)
        .with_ignored(ignored)
        .with_recursive(args.recursive());

    let mut index = engine.build_index()?;
    if index.is_empty() {
        info!("Target holds no matching files yet");
    } else {
        info!(
            "Baseline: {} files ({}), {} names claimed",
            index.stats().total_files,
            format_bytes(index.stats().total_bytes),
            index.name_count()
        );
    }
    let stats = engine.run(&mut index, &mut LogSink)?;

    info!(
        "Run finished: {} scanned, {} copied ({} renamed), {} duplicates, {} ignored, {} failed",
        stats.scanned, stats.copied, stats.renamed, stats.duplicates, stats.ignored, stats.failed
    );

    Ok(stats)
}

/// Write the example config to the standard location
pub fn handle_init_config() -> Result<()> {
    let path = init_config()?;
    print_success(&format!("Configuration file: {}", path.display()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_config(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("photomerge.toml");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_report_config_custom_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            temp_dir.path(),
            "[extensions]\nallowed = [\".jpg\"]\n[files]\nignored = [\"x.jpg\"]\n",
        );

        let source = ConfigSource::Custom(path);
        let config = report_config(&source, Config::load(source.path())).unwrap();
        assert_eq!(config.extensions.allowed, vec![".jpg"]);
        assert_eq!(config.files.ignored, vec!["x.jpg"]);
    }

    #[test]
    fn test_report_config_missing_file_is_fatal() {
        let source = ConfigSource::Custom("nonexistent/config.toml".into());
        let err = report_config(&source, Config::load(source.path())).unwrap_err();
        assert!(err.to_string().starts_with("Configuration file not found"));
    }

    #[test]
    fn test_run_merge_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("A");
        let target = temp_dir.path().join("B");
        fs::create_dir_all(source.join("sub")).unwrap();
        fs::create_dir(&target).unwrap();
        fs::write(source.join("a.jpg"), b"X").unwrap();
        fs::write(source.join("sub/a.jpg"), b"X").unwrap();
        fs::write(source.join("Thumbs.db"), b"junk").unwrap();

        let config = Config::from_toml_str(
            "[extensions]\nallowed = [\".jpg\", \".db\"]\n[files]\nignored = [\"Thumbs.db\"]\n",
        )
        .unwrap();
        let args = Args::try_parse_from([
            "photomerge",
            "-s",
            source.to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
        ])
        .unwrap();

        let stats = run_merge(&args, &config).unwrap();

        assert_eq!(stats.copied, 1);
        assert_eq!(stats.duplicates, 1);
        assert_eq!(stats.ignored, 1);
        assert_eq!(fs::read(target.join("a.jpg")).unwrap(), b"X");
        assert!(!target.join("a_1.jpg").exists());
        assert!(!target.join("Thumbs.db").exists());
    }

    #[test]
    fn test_run_merge_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("B");
        fs::create_dir(&target).unwrap();

        let config = Config::from_toml_str("[extensions]\nallowed = [\".jpg\"]\n").unwrap();
        let args = Args::try_parse_from([
            "photomerge",
            "-s",
            temp_dir.path().join("Missing").to_str().unwrap(),
            "-t",
            target.to_str().unwrap(),
        ])
        .unwrap();

        let err = run_merge(&args, &config).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("Source directory does not exist"));
        assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
    }
}

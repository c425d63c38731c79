//! photomerge
//!
//! Merges photos from a source folder tree into a flat target folder. Files
//! whose content already exists in the target are skipped, and name clashes
//! are resolved with a numeric suffix, so nothing in the target is ever
//! overwritten.
//!
//! # Architecture
//!
//! - [`core`] - Configuration, errors, path validation, merge events and the
//!   merge engine itself
//! - [`duplicate`] - SHA-256 content fingerprints and the target baseline
//! - [`files`] - Source enumeration, extension filtering and copying
//! - [`cli`] - Command-line interface (only used by the binary)
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use photomerge::core::events::LogSink;
//! use photomerge::core::merge::MergeEngine;
//! use photomerge::core::paths::resolve_paths;
//! use photomerge::files::ExtensionFilter;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let (source, target) = resolve_paths(Path::new("A"), Path::new("B"))?;
//!     let engine = MergeEngine::new(source, target, ExtensionFilter::new([".jpg", ".png"]));
//!
//!     let mut index = engine.build_index()?;
//!     let stats = engine.run(&mut index, &mut LogSink)?;
//!     println!("{} new files", stats.copied);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod core;
pub mod duplicate;
pub mod files;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

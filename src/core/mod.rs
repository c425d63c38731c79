//! Core functionality module
//!
//! This module contains the core business logic for photomerge: configuration,
//! error handling, path resolution and the merge engine itself.
//!
//! # Submodules
//!
//! - `config` - Configuration loading and management
//! - `error` - Error types and result aliases
//! - `events` - Merge events and the sinks that receive them
//! - `merge` - The per-file dedup and placement engine
//! - `paths` - Source/target directory validation

pub mod config;
pub mod error;
pub mod events;
pub mod merge;
pub mod paths;

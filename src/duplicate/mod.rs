//! Duplicate detection module
//!
//! Content fingerprints and the baseline index of what the target already
//! holds.
//!
//! # Submodules
//!
//! - `detector` - Fingerprinting and the fingerprint/name index

pub mod detector;

pub use detector::{
    compute_data_hash, compute_file_hash, hash_to_hex, DuplicateIndex, Fingerprint, IndexStats,
    Sha256Hash,
};

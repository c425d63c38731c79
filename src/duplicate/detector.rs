//! Duplicate Detection Module
//!
//! Exact-match duplicate detection using SHA256 content hashes.
//!
//! # Architecture
//!
//! A [`DuplicateIndex`] holds two sets that only ever grow during a run:
//! 1. **Fingerprints**: hashes of content already accounted for
//! 2. **Names**: destination basenames already claimed in the target
//!
//! The index is seeded from the files directly inside the target directory
//! ([`DuplicateIndex::build_from_target`]) and then extended by the merge
//! engine as it accepts new files.
//!
//! # Example
//!
//! ```rust,no_run
//! use photomerge::duplicate::DuplicateIndex;
//! use photomerge::files::ExtensionFilter;
//! use std::path::Path;
//!
//! let filter = ExtensionFilter::new([".jpg", ".png"]);
//! let index = DuplicateIndex::build_from_target(Path::new("D:/Photos"), &filter).unwrap();
//!
//! let fingerprint = photomerge::duplicate::compute_file_hash(Path::new("new.jpg")).unwrap();
//! if index.contains_fingerprint(&fingerprint) {
//!     println!("Already in the library");
//! }
//! ```

use crate::core::error::{MergeError, Result};
use crate::files::{find_files_with_extensions, ExtensionFilter};
use log::{debug, info};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// SHA256 hash represented as a fixed-size array
pub type Sha256Hash = [u8; 32];

/// Content digest of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(Sha256Hash);

impl Fingerprint {
    /// Lowercase hex form
    pub fn to_hex(&self) -> String {
        hash_to_hex(&self.0)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Sha256Hash> for Fingerprint {
    fn from(hash: Sha256Hash) -> Self {
        Fingerprint(hash)
    }
}

/// Statistics about the baseline index
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Files fingerprinted from the target
    pub total_files: usize,
    /// Total size of those files
    pub total_bytes: u64,
    /// Number of unique hashes (the target may already hold duplicates)
    pub unique_hashes: usize,
    /// Time taken to build the index (in milliseconds)
    pub build_time_ms: u64,
}

/// Content fingerprints and claimed names for one run
#[derive(Debug, Default)]
pub struct DuplicateIndex {
    fingerprints: HashSet<Fingerprint>,
    names: HashSet<OsString>,
    stats: IndexStats,
}

impl DuplicateIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the baseline from files directly inside `target`.
    ///
    /// Subdirectories of the target are not looked at. Any file that cannot
    /// be read aborts the build: a baseline missing a file would let its
    /// content be copied in again.
    pub fn build_from_target(target: &Path, filter: &ExtensionFilter) -> Result<Self> {
        let start_time = Instant::now();
        let mut index = Self::new();

        info!("Indexing existing files in {}", target.display());

        for file in find_files_with_extensions(target, Some(filter), false) {
            let data = read_file(&file.path)?;
            index.stats.total_bytes += data.len() as u64;
            index.stats.total_files += 1;

            let fingerprint = compute_data_hash(&data);
            debug!("Indexed {} ({})", file.display_name(), fingerprint);

            index.insert_fingerprint(fingerprint);
            index.claim_name(&file.name);
        }

        index.stats.unique_hashes = index.fingerprints.len();
        index.stats.build_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Index built: {} files, {} unique hashes in {}ms",
            index.stats.total_files, index.stats.unique_hashes, index.stats.build_time_ms
        );

        Ok(index)
    }

    /// Whether this content is already accounted for
    pub fn contains_fingerprint(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// Record content as accounted for. Returns `false` if it already was.
    pub fn insert_fingerprint(&mut self, fingerprint: Fingerprint) -> bool {
        self.fingerprints.insert(fingerprint)
    }

    /// Whether a destination basename is already taken.
    ///
    /// Names compare as raw OS strings: no case folding, no UTF-8 lossiness.
    pub fn is_name_claimed(&self, name: impl AsRef<OsStr>) -> bool {
        self.names.contains(name.as_ref())
    }

    /// Claim a destination basename. Returns `false` if it already was.
    pub fn claim_name(&mut self, name: impl AsRef<OsStr>) -> bool {
        self.names.insert(name.as_ref().to_os_string())
    }

    pub fn name_count(&self) -> usize {
        self.names.len()
    }

    /// Get statistics about the baseline
    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty() && self.names.is_empty()
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| MergeError::ReadFailure {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute the fingerprint of a file.
///
/// The whole file is read into memory.
pub fn compute_file_hash(path: &Path) -> Result<Fingerprint> {
    let data = read_file(path)?;
    Ok(compute_data_hash(&data))
}

/// Compute SHA256 hash of in-memory data
pub fn compute_data_hash(data: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    Fingerprint(hash)
}

/// Convert a hash to a hexadecimal string
pub fn hash_to_hex(hash: &Sha256Hash) -> String {
    hash.iter().map(|b| format!("{:02x}", b)).collect()
}

//! Merge engine
//!
//! Walks the source root once and decides, per file:
//!
//! 1. basename on the ignore list: skip without hashing
//! 2. fingerprint already known: skip silently (content duplicate)
//! 3. otherwise claim the fingerprint, then copy to `target/<name>`, or to
//!    `target/<stem>_<n><suffix>` when `<name>` is already claimed
//!
//! Claims are made before the copy and are never rolled back, so a file whose
//! copy failed still counts as present for the rest of the run.

use crate::core::error::Result;
use crate::core::events::{EventSink, MergeEvent};
use crate::core::paths::DirectoryRoot;
use crate::duplicate::{compute_file_hash, DuplicateIndex};
use crate::files::{
    find_files_with_extensions, CandidateFile, ExtensionFilter, FileTransfer, FsTransfer,
    IgnoreSet,
};
use log::debug;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Counters for one merge run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Candidate files seen in the source
    pub scanned: usize,
    /// Skipped because of the ignore list
    pub ignored: usize,
    /// Skipped because the content was already accounted for
    pub duplicates: usize,
    /// Successfully copied (including renamed copies)
    pub copied: usize,
    /// Copied under a generated name
    pub renamed: usize,
    /// Copies that failed
    pub failed: usize,
    /// Bytes written to the target
    pub bytes_copied: u64,
}

/// What happened to a single candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Ignored,
    Duplicate,
    Copied { dest: PathBuf },
    Renamed { dest: PathBuf },
    Failed { dest: PathBuf },
}

/// Merges one source tree into a target directory
pub struct MergeEngine<T: FileTransfer = FsTransfer> {
    source: DirectoryRoot,
    target: DirectoryRoot,
    extensions: ExtensionFilter,
    ignored: IgnoreSet,
    recursive: bool,
    transfer: T,
}

impl MergeEngine<FsTransfer> {
    /// Create an engine that copies on the local filesystem, recursing into
    /// the source and ignoring nothing
    pub fn new(source: DirectoryRoot, target: DirectoryRoot, extensions: ExtensionFilter) -> Self {
        Self {
            source,
            target,
            extensions,
            ignored: IgnoreSet::default(),
            recursive: true,
            transfer: FsTransfer,
        }
    }
}

impl<T: FileTransfer> MergeEngine<T> {
    /// Set the basenames to skip
    pub fn with_ignored(mut self, ignored: IgnoreSet) -> Self {
        self.ignored = ignored;
        self
    }

    /// Set whether to descend into source subdirectories
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the copy primitive
    pub fn with_transfer<U: FileTransfer>(self, transfer: U) -> MergeEngine<U> {
        MergeEngine {
            source: self.source,
            target: self.target,
            extensions: self.extensions,
            ignored: self.ignored,
            recursive: self.recursive,
            transfer,
        }
    }

    /// Build the baseline index from the target directory
    pub fn build_index(&self) -> Result<DuplicateIndex> {
        DuplicateIndex::build_from_target(self.target.path(), &self.extensions)
    }

    /// Process every candidate in the source exactly once.
    ///
    /// Stops at the first file that cannot be read for fingerprinting.
    pub fn run(&self, index: &mut DuplicateIndex, sink: &mut dyn EventSink) -> Result<MergeStats> {
        let mut stats = MergeStats::default();

        let candidates =
            find_files_with_extensions(self.source.path(), Some(&self.extensions), self.recursive);

        for file in candidates {
            stats.scanned += 1;

            match self.process_file(&file, index, sink)? {
                FileOutcome::Ignored => stats.ignored += 1,
                FileOutcome::Duplicate => stats.duplicates += 1,
                FileOutcome::Copied { dest } => {
                    stats.copied += 1;
                    stats.bytes_copied += file_len(&dest);
                }
                FileOutcome::Renamed { dest } => {
                    stats.copied += 1;
                    stats.renamed += 1;
                    stats.bytes_copied += file_len(&dest);
                }
                FileOutcome::Failed { .. } => stats.failed += 1,
            }
        }

        Ok(stats)
    }

    /// Decide and act on a single candidate
    pub fn process_file(
        &self,
        file: &CandidateFile,
        index: &mut DuplicateIndex,
        sink: &mut dyn EventSink,
    ) -> Result<FileOutcome> {
        if self.ignored.contains(&file.name) {
            sink.emit(MergeEvent::Ignored {
                name: file.display_name(),
            });
            return Ok(FileOutcome::Ignored);
        }

        let fingerprint = compute_file_hash(&file.path)?;

        if index.contains_fingerprint(&fingerprint) {
            debug!("Duplicate content: {} ({})", file.path.display(), fingerprint);
            return Ok(FileOutcome::Duplicate);
        }

        sink.emit(MergeEvent::NewContent {
            name: file.display_name(),
        });
        index.insert_fingerprint(fingerprint);

        if !index.is_name_claimed(&file.name) {
            index.claim_name(&file.name);
            let dest = self.target.join(&file.name);

            if self.transfer.transfer(&file.path, &dest) {
                sink.emit(MergeEvent::Saved {
                    name: file.display_name(),
                    target: self.target.path().to_path_buf(),
                });
                return Ok(FileOutcome::Copied { dest });
            }

            sink.emit(MergeEvent::CopyFailed {
                name: file.display_name(),
                renamed: false,
            });
            return Ok(FileOutcome::Failed { dest });
        }

        let new_name = self.free_name(file);
        index.claim_name(&new_name);
        let dest = self.target.join(&new_name);

        if self.transfer.transfer(&file.path, &dest) {
            sink.emit(MergeEvent::SavedAs {
                name: file.display_name(),
                target: self.target.path().to_path_buf(),
                saved_as: new_name.to_string_lossy().into_owned(),
            });
            return Ok(FileOutcome::Renamed { dest });
        }

        sink.emit(MergeEvent::CopyFailed {
            name: file.display_name(),
            renamed: true,
        });
        Ok(FileOutcome::Failed { dest })
    }

    /// First `<stem>_<n><suffix>` (n >= 1) with no file in the target.
    ///
    /// Probes the filesystem rather than the name set, so a file the index
    /// never saw (e.g. one with a disallowed extension) is not overwritten.
    fn free_name(&self, file: &CandidateFile) -> OsString {
        let mut counter: u64 = 1;
        loop {
            let candidate = numbered_name(file, counter);
            if !self.target.join(&candidate).exists() {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// `<stem>_<n><suffix>`, built on raw OS strings
fn numbered_name(file: &CandidateFile, counter: u64) -> OsString {
    let mut name = file.stem.clone();
    name.push(format!("_{}", counter));
    name.push(&file.suffix);
    name
}

fn file_len(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

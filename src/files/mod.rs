//! Filesystem primitives
//!
//! # Submodules
//!
//! - `enumerate` - Lazy, extension-filtered directory traversal
//! - `transfer` - Single-file copy that reports failure as `false`

pub mod enumerate;
pub mod transfer;

pub use enumerate::{
    find_files_with_extensions, suffix_of, CandidateFile, ExtensionFilter, FileEnumerator,
    IgnoreSet,
};
pub use transfer::{copy_file, FileTransfer, FsTransfer};

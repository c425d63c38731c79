//! Error types for photomerge
//!
//! Every variant here is fatal to a run. Per-file copy failures are not
//! errors: the transfer layer reports them as `false` and the merge carries on.

use std::path::PathBuf;
use thiserror::Error;

/// Which of the two directory roots a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootRole {
    Source,
    Target,
}

impl std::fmt::Display for RootRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RootRole::Source => write!(f, "Source"),
            RootRole::Target => write!(f, "Target"),
        }
    }
}

/// Main error type for photomerge
#[derive(Error, Debug)]
pub enum MergeError {
    /// Source or target root is missing at start
    #[error("{role} directory does not exist: {}", path.display())]
    PathNotFound { role: RootRole, path: PathBuf },

    /// A file could not be read for fingerprinting
    #[error("Failed to read file '{}': {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, MergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_message() {
        let err = MergeError::PathNotFound {
            role: RootRole::Source,
            path: PathBuf::from("/nope/A"),
        };
        assert_eq!(err.to_string(), "Source directory does not exist: /nope/A");

        let err = MergeError::PathNotFound {
            role: RootRole::Target,
            path: PathBuf::from("/nope/B"),
        };
        assert_eq!(err.to_string(), "Target directory does not exist: /nope/B");
    }

    #[test]
    fn test_read_failure_keeps_io_source() {
        use std::error::Error;

        let err = MergeError::ReadFailure {
            path: PathBuf::from("/a/locked.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(err.to_string(), "Failed to read file '/a/locked.jpg': denied");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "denied");
    }
}

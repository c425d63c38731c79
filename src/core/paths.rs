//! Source and target directory resolution

use crate::core::error::{MergeError, Result, RootRole};
use std::path::{Path, PathBuf};

/// An existing directory, resolved to an absolute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRoot {
    path: PathBuf,
}

impl DirectoryRoot {
    /// Resolve `path` and check that it is an existing directory
    pub fn resolve(path: impl AsRef<Path>, role: RootRole) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(MergeError::PathNotFound {
                role,
                path: path.to_path_buf(),
            });
        }

        let path = path.canonicalize().map_err(|_| MergeError::PathNotFound {
            role,
            path: path.to_path_buf(),
        })?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `name` directly under this root
    pub fn join(&self, name: impl AsRef<Path>) -> PathBuf {
        self.path.join(name)
    }
}

impl AsRef<Path> for DirectoryRoot {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Validate both roots of a run; the source is checked first.
pub fn resolve_paths(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
) -> Result<(DirectoryRoot, DirectoryRoot)> {
    let source = DirectoryRoot::resolve(source, RootRole::Source)?;
    let target = DirectoryRoot::resolve(target, RootRole::Target)?;
    Ok((source, target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_paths_success() {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = temp_dir.path().join("A");
        let target_dir = temp_dir.path().join("B");
        fs::create_dir(&source_dir).unwrap();
        fs::create_dir(&target_dir).unwrap();

        let (source, target) = resolve_paths(&source_dir, &target_dir).unwrap();

        assert_eq!(source.path(), source_dir.canonicalize().unwrap());
        assert_eq!(target.path(), target_dir.canonicalize().unwrap());
        assert!(source.path().is_absolute());
    }

    #[test]
    fn test_resolve_paths_source_missing() {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = temp_dir.path().join("Missing");
        let target_dir = temp_dir.path().join("B");
        fs::create_dir(&target_dir).unwrap();

        let err = resolve_paths(&source_dir, &target_dir).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Source directory does not exist: {}", source_dir.display())
        );
    }

    #[test]
    fn test_resolve_paths_target_missing() {
        let temp_dir = TempDir::new().unwrap();
        let source_dir = temp_dir.path().join("A");
        fs::create_dir(&source_dir).unwrap();
        let target_dir = temp_dir.path().join("Missing");

        let err = resolve_paths(&source_dir, &target_dir).unwrap_err();
        assert!(matches!(
            err,
            MergeError::PathNotFound {
                role: RootRole::Target,
                ..
            }
        ));
    }

    #[test]
    fn test_regular_file_is_not_a_root() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.jpg");
        fs::write(&file, b"X").unwrap();

        assert!(DirectoryRoot::resolve(&file, RootRole::Source).is_err());
    }
}

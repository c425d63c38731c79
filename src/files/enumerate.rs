//! File enumeration
//!
//! Lazily walks a directory root and yields the regular files whose suffix
//! is in an [`ExtensionFilter`]. Two modes:
//!
//! - **Shallow**: only direct children of the root
//! - **Recursive**: the whole subtree
//!
//! Directory entries are visited in file-name order, so the sequence is the
//! same for the same tree on every run.

use log::warn;
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Set of allowed file suffixes (lowercase, dot-prefixed)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter {
    suffixes: HashSet<String>,
}

impl ExtensionFilter {
    /// Build a filter; entries are lowercased and given a leading dot if missing
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| {
                let ext = ext.as_ref().trim().to_lowercase();
                if ext.starts_with('.') {
                    ext
                } else {
                    format!(".{}", ext)
                }
            })
            .filter(|ext| ext.len() > 1)
            .collect();

        Self { suffixes }
    }

    /// Whether the path's suffix is allowed
    pub fn matches(&self, path: &Path) -> bool {
        match suffix_of(path) {
            Some(suffix) => self.suffixes.contains(&suffix),
            None => false,
        }
    }

    /// Suffixes in sorted order, for logging
    pub fn sorted(&self) -> Vec<&str> {
        let mut suffixes: Vec<&str> = self.suffixes.iter().map(String::as_str).collect();
        suffixes.sort_unstable();
        suffixes
    }
}

/// Exact basenames excluded from a merge, compared byte for byte
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<OsString>,
}

impl IgnoreSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: impl AsRef<OsStr>) -> bool {
        self.names.contains(name.as_ref())
    }

    /// Names in sorted order, for logging
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .names
            .iter()
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Lowercased, dot-prefixed suffix of a path (`photo.JPG` -> `.jpg`)
pub fn suffix_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
}

/// A file produced by enumeration.
///
/// Name parts are kept as raw OS strings so a basename that is not valid
/// UTF-8 reaches the target unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// Absolute, symlink-resolved path
    pub path: PathBuf,
    /// Basename of the resolved path, e.g. `IMG_0001.JPG`
    pub name: OsString,
    /// File stem, e.g. `IMG_0001`
    pub stem: OsString,
    /// Suffix as written, including the dot (e.g. `.JPG`), or empty
    pub suffix: OsString,
}

impl CandidateFile {
    pub fn from_path(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_os_string();
        let stem = path
            .file_stem()
            .map(OsStr::to_os_string)
            .unwrap_or_else(|| name.clone());
        let suffix = match path.extension() {
            Some(ext) => {
                let mut suffix = OsString::from(".");
                suffix.push(ext);
                suffix
            }
            None => OsString::new(),
        };

        Some(Self {
            path,
            name,
            stem,
            suffix,
        })
    }

    /// Basename for log messages, lossy on non-UTF-8 names
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

/// Lazy sequence of matching files under a root
pub struct FileEnumerator<'a> {
    walker: walkdir::IntoIter,
    filter: Option<&'a ExtensionFilter>,
}

impl<'a> FileEnumerator<'a> {
    /// Start enumerating `root`. Without a filter every file is yielded.
    pub fn new(root: &Path, filter: Option<&'a ExtensionFilter>, recursive: bool) -> Self {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Self { walker, filter }
    }
}

impl Iterator for FileEnumerator<'_> {
    type Item = CandidateFile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            if let Some(filter) = self.filter {
                if !filter.matches(path) {
                    continue;
                }
            }

            // Follows symlinks, so a link to a file counts and a directory never does
            if !path.is_file() {
                continue;
            }

            let resolved = match path.canonicalize() {
                Ok(resolved) => resolved,
                Err(e) => {
                    warn!("Failed to resolve {}: {}", path.display(), e);
                    continue;
                }
            };

            // A symlink is named after the file it points to
            if let Some(candidate) = CandidateFile::from_path(resolved) {
                return Some(candidate);
            }
        }
    }
}

/// Enumerate files under `root` whose suffix is in `filter`
pub fn find_files_with_extensions<'a>(
    root: &Path,
    filter: Option<&'a ExtensionFilter>,
    recursive: bool,
) -> FileEnumerator<'a> {
    FileEnumerator::new(root, filter, recursive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn build_tree() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("folder1/nested")).unwrap();
        fs::create_dir_all(root.join("album.jpg")).unwrap();

        for name in [
            "file1.jpg",
            "file2.PNG",
            "notes.txt",
            "folder1/file3.jpg",
            "folder1/file4.txt",
            "folder1/nested/deep.JPG",
        ] {
            fs::write(root.join(name), name.as_bytes()).unwrap();
        }

        temp_dir
    }

    fn names(files: impl Iterator<Item = CandidateFile>) -> Vec<String> {
        files.map(|f| f.display_name()).collect()
    }

    #[test]
    fn test_filter_normalizes_entries() {
        let filter = ExtensionFilter::new([".JPG", "png", " .heic", ""]);
        assert_eq!(filter.sorted(), vec![".heic", ".jpg", ".png"]);
        assert!(filter.matches(Path::new("a.Jpg")));
        assert!(filter.matches(Path::new("dir/b.png")));
        assert!(!filter.matches(Path::new("c.txt")));
    }

    #[test]
    fn test_filter_ignores_files_without_suffix() {
        let filter = ExtensionFilter::new([".jpg"]);
        assert!(!filter.matches(Path::new("README")));
        assert!(!filter.matches(Path::new(".jpg")));
    }

    #[test]
    fn test_suffix_of() {
        assert_eq!(suffix_of(Path::new("x/IMG.HEIC")), Some(".heic".to_string()));
        assert_eq!(suffix_of(Path::new("archive.tar.gz")), Some(".gz".to_string()));
        assert_eq!(suffix_of(Path::new("Makefile")), None);
    }

    #[test]
    fn test_recursive_enumeration() {
        let tree = build_tree();
        let filter = ExtensionFilter::new([".jpg", ".png"]);

        let found = names(find_files_with_extensions(tree.path(), Some(&filter), true));

        assert_eq!(found, vec!["file1.jpg", "file2.PNG", "file3.jpg", "deep.JPG"]);
    }

    #[test]
    fn test_shallow_enumeration() {
        let tree = build_tree();
        let filter = ExtensionFilter::new([".jpg", ".png"]);

        let found = names(find_files_with_extensions(tree.path(), Some(&filter), false));

        // album.jpg is a directory and must not be yielded
        assert_eq!(found, vec!["file1.jpg", "file2.PNG"]);
    }

    #[test]
    fn test_no_filter_yields_all_files() {
        let tree = build_tree();

        let shallow = names(find_files_with_extensions(tree.path(), None, false));
        assert_eq!(shallow, vec!["file1.jpg", "file2.PNG", "notes.txt"]);

        let all = find_files_with_extensions(tree.path(), None, true).count();
        assert_eq!(all, 6);
    }

    #[test]
    fn test_paths_are_resolved() {
        let tree = build_tree();
        let filter = ExtensionFilter::new([".jpg"]);

        for file in find_files_with_extensions(tree.path(), Some(&filter), true) {
            assert!(file.path.is_absolute());
            assert_eq!(file.path, file.path.canonicalize().unwrap());
        }
    }

    #[test]
    fn test_candidate_parts() {
        let tree = build_tree();
        let filter = ExtensionFilter::new([".png"]);

        let file = find_files_with_extensions(tree.path(), Some(&filter), false)
            .next()
            .unwrap();

        assert_eq!(file.name.as_os_str(), OsStr::new("file2.PNG"));
        assert_eq!(file.stem.as_os_str(), OsStr::new("file2"));
        assert_eq!(file.suffix.as_os_str(), OsStr::new(".PNG"));
    }

    #[test]
    fn test_enumeration_is_deterministic() {
        let tree = build_tree();
        let filter = ExtensionFilter::new([".jpg", ".png", ".txt"]);

        let first = names(find_files_with_extensions(tree.path(), Some(&filter), true));
        let second = names(find_files_with_extensions(tree.path(), Some(&filter), true));

        assert_eq!(first, second);
    }

    #[test]
    fn test_ignore_set() {
        let ignored = IgnoreSet::new(["Thumbs.db", "skip.jpg"]);
        assert!(ignored.contains("skip.jpg"));
        assert!(!ignored.contains("SKIP.jpg"));
        assert_eq!(ignored.sorted(), vec!["Thumbs.db", "skip.jpg"]);
        assert!(!IgnoreSet::default().contains("skip.jpg"));
    }

    #[test]
    fn test_candidate_without_suffix() {
        let file = CandidateFile::from_path(PathBuf::from("/x/Makefile")).unwrap();
        assert_eq!(file.stem.as_os_str(), OsStr::new("Makefile"));
        assert!(file.suffix.is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_kept_verbatim() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let raw = OsStr::from_bytes(b"caf\xe9.JPG");
        fs::write(temp_dir.path().join(raw), b"A").unwrap();

        let filter = ExtensionFilter::new([".jpg"]);
        let file = find_files_with_extensions(temp_dir.path(), Some(&filter), false)
            .next()
            .unwrap();

        assert_eq!(file.name.as_bytes(), b"caf\xe9.JPG");
        assert_eq!(file.stem.as_bytes(), b"caf\xe9");
        assert_eq!(file.suffix.as_os_str(), OsStr::new(".JPG"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_takes_name_of_its_target() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("source");
        let real = temp_dir.path().join("real");
        fs::create_dir(&source).unwrap();
        fs::create_dir(&real).unwrap();
        fs::write(real.join("photo.jpg"), b"P").unwrap();
        std::os::unix::fs::symlink(real.join("photo.jpg"), source.join("link.jpg")).unwrap();

        let filter = ExtensionFilter::new([".jpg"]);
        let files: Vec<CandidateFile> =
            find_files_with_extensions(&source, Some(&filter), true).collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name.as_os_str(), OsStr::new("photo.jpg"));
        assert_eq!(files[0].path, real.join("photo.jpg").canonicalize().unwrap());
    }
}

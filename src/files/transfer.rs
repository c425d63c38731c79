//! File transfer
//!
//! Copies one file's bytes and, best effort, its access/modification times.
//! Failures never escape as errors: they are logged with both paths and
//! reported as `false`, so callers only branch on a boolean.

use filetime::{set_file_times, FileTime};
use log::{error, warn};
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

/// Something that can place a file at a destination
pub trait FileTransfer {
    /// Copy `src` to `dst`. `dst` may be an existing directory, in which case
    /// the file keeps its basename. Returns whether the copy succeeded.
    fn transfer(&self, src: &Path, dst: &Path) -> bool;
}

/// Copies on the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTransfer;

impl FileTransfer for FsTransfer {
    fn transfer(&self, src: &Path, dst: &Path) -> bool {
        copy_file(src, dst)
    }
}

/// Copy a file, preserving timestamps when possible
pub fn copy_file(src: &Path, dst: &Path) -> bool {
    let dst = destination_path(src, dst);

    match copy_with_timestamps(src, &dst) {
        Ok(_) => true,
        Err(e) => {
            error!(
                "Failed to copy '{}' to '{}': {}",
                src.display(),
                dst.display(),
                e
            );
            false
        }
    }
}

/// Resolve copy-into-directory semantics
fn destination_path(src: &Path, dst: &Path) -> PathBuf {
    if dst.is_dir() {
        if let Some(name) = src.file_name() {
            return dst.join(name);
        }
    }
    dst.to_path_buf()
}

fn copy_with_timestamps(src: &Path, dst: &Path) -> io::Result<u64> {
    let src_meta = fs::metadata(src)?;
    if !src_meta.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "source is not a regular file",
        ));
    }

    let bytes = fs::copy(src, dst)?;

    if let Err(e) = preserve_timestamps(&src_meta, dst) {
        warn!("Could not preserve timestamps on {}: {}", dst.display(), e);
    }

    Ok(bytes)
}

/// Preserve file timestamps (mtime and atime)
fn preserve_timestamps(src_meta: &Metadata, dst: &Path) -> io::Result<()> {
    let mtime = FileTime::from_last_modification_time(src_meta);
    let atime = FileTime::from_last_access_time(src_meta);
    set_file_times(dst, atime, mtime)
}

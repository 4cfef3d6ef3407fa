//! Atomic I/O operations with file locking

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result};

/// Owner and group read-write, no world access, no execute bit.
pub const MANIFEST_FILE_MODE: u32 = 0o660;

/// Options controlling how [`write_atomic`] creates the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Permission bits applied when the file is created (unix only).
    pub mode: u32,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            mode: MANIFEST_FILE_MODE,
        }
    }
}

/// Write content atomically to a file with locking.
///
/// The content goes to a temp file in the destination directory, created with
/// `options.mode` already set, and is renamed over the destination once it is
/// flushed. The destination is never observable in a half-written state or
/// with wider permissions than requested.
pub fn write_atomic(path: &Path, content: &[u8], options: &WriteOptions) -> Result<()> {
    let temp_path = temp_path_for(path).ok_or_else(|| Error::NoFileName {
        path: path.to_path_buf(),
    })?;

    let result = write_temp(&temp_path, path, content, options)
        .and_then(|()| fs::rename(&temp_path, path).map_err(|e| Error::io(path, e)));

    match result {
        Ok(()) => {
            tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file atomically");
            Ok(())
        }
        Err(e) => {
            remove_if_exists(&temp_path);
            Err(e)
        }
    }
}

fn write_temp(temp_path: &Path, target: &Path, content: &[u8], options: &WriteOptions) -> Result<()> {
    // A stale temp file from a crashed run may carry other permissions
    remove_if_exists(temp_path);

    let mut temp_file = open_restricted(temp_path, options.mode)?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: target.to_path_buf(),
        })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::io(temp_path, e))?;

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;

    Ok(())
}

fn open_restricted(path: &Path, mode: u32) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path).map_err(|e| Error::io(path, e))
}

fn remove_if_exists(path: &Path) {
    if let Err(e) = fs::remove_file(path)
        && e.kind() != ErrorKind::NotFound
    {
        tracing::warn!(path = %path.display(), error = %e, "failed to remove temp file");
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str, options: &WriteOptions) -> Result<()> {
    write_atomic(path, content.as_bytes(), options)
}

/// Resolve the temp file path [`write_atomic`] stages `path` in.
///
/// The temp file lives in the same directory so the final rename stays on
/// one filesystem.
pub fn temp_path_for(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    Some(path.with_file_name(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    )))
}

//! Internal implementation for the installer
//!
//! File discovery, metadata-preserving copies, and the staged swap of the
//! detail tree.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Result, ScaffoldError};

/// Regular files directly inside `dir` with the given extension, sorted.
pub(super) fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ScaffoldError::PathNotFound(dir.to_path_buf()));
    }
    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(&dir.to_string_lossy()),
        extension
    );
    let entries = glob::glob(&pattern).map_err(|e| ScaffoldError::Io {
        path: dir.to_path_buf(),
        source: io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            ScaffoldError::from_io(path, e.into_error())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Copy a file, keeping its permissions and access/modification times.
pub(super) fn copy_preserving(src: &Path, dest: &Path) -> Result<()> {
    fs::copy(src, dest).map_err(|e| ScaffoldError::from_io(dest, e))?;

    let meta = fs::metadata(src).map_err(|e| ScaffoldError::from_io(src, e))?;
    let times = fs::FileTimes::new()
        .set_accessed(meta.accessed().map_err(|e| ScaffoldError::from_io(src, e))?)
        .set_modified(meta.modified().map_err(|e| ScaffoldError::from_io(src, e))?);
    // Explicit timestamps only need ownership on unix, so a read-only copy
    // can still be stamped.
    #[cfg(unix)]
    let file = fs::File::open(dest);
    #[cfg(not(unix))]
    let file = fs::File::options().write(true).open(dest);
    file.and_then(|file| file.set_times(times))
        .map_err(|e| ScaffoldError::from_io(dest, e))
}

/// OR `bits` into the file's mode; a no-op off unix or for zero bits.
pub(super) fn add_mode(path: &Path, bits: u32) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if bits != 0 {
            let mut perms = fs::metadata(path)
                .map_err(|e| ScaffoldError::from_io(path, e))?
                .permissions();
            perms.set_mode(perms.mode() | bits);
            fs::set_permissions(path, perms).map_err(|e| ScaffoldError::from_io(path, e))?;
        }
    }
    #[cfg(not(unix))]
    let _ = (path, bits);
    Ok(())
}

/// Recursively copy the contents of `src` into the existing directory `dest`.
fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            ScaffoldError::from_io(path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| ScaffoldError::from_io(&target, e))?;
        } else {
            copy_preserving(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Replace the directory `dest` with a copy of `src`.
///
/// The copy is built in a hidden sibling first. Only when it is complete is
/// the old tree renamed aside and the new one renamed into place; if that
/// second rename fails the old tree is renamed back.
pub(super) fn replace_tree(src: &Path, dest: &Path) -> Result<()> {
    let parent = dest
        .parent()
        .ok_or_else(|| ScaffoldError::PathNotFound(dest.to_path_buf()))?;

    let staging = tempfile::Builder::new()
        .prefix(".detail-staging-")
        .tempdir_in(parent)
        .map_err(|e| ScaffoldError::from_io(parent, e))?;
    let src_perms = fs::metadata(src)
        .map_err(|e| ScaffoldError::from_io(src, e))?
        .permissions();
    copy_tree(src, staging.path())?;
    fs::set_permissions(staging.path(), src_perms)
        .map_err(|e| ScaffoldError::from_io(staging.path(), e))?;

    let backup = staging.path().with_extension("old");
    let had_old = dest.exists();
    if had_old {
        fs::rename(dest, &backup).map_err(|e| ScaffoldError::from_io(dest, e))?;
    }

    if let Err(e) = fs::rename(staging.path(), dest) {
        if had_old {
            if let Err(restore) = fs::rename(&backup, dest) {
                tracing::warn!(
                    backup = %backup.display(),
                    error = %restore,
                    "could not restore previous detail tree"
                );
            }
        }
        return Err(ScaffoldError::from_io(dest, e));
    }

    if had_old {
        if let Err(e) = fs::remove_dir_all(&backup) {
            tracing::warn!(path = %backup.display(), error = %e, "could not remove old detail tree");
        }
    }
    tracing::debug!(dest = %dest.display(), "detail tree replaced");
    // `staging` no longer exists on disk; dropping it is a no-op.
    Ok(())
}

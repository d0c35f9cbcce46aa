//! Atomic symlink operations
//!
//! Every mutation of a mirror directory goes through this module. A link is
//! never observable in a half-written state: replacements create the new link
//! under a temporary sibling name and rename it over the old one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, NormalizedPath, Result};

/// Suffix used for links that are being swapped into place.
pub const TEMP_SUFFIX: &str = ".mirror-tmp";

/// Temporary sibling path used while swapping `link` into place.
pub fn temp_path_for(link: &Path) -> PathBuf {
    let name = link
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    link.with_file_name(format!(".{}{}", name, TEMP_SUFFIX))
}

/// Whether a directory entry name belongs to an interrupted swap.
pub fn is_temp_name(name: &str) -> bool {
    name.starts_with('.') && name.ends_with(TEMP_SUFFIX)
}

/// Point `link` at `target`, creating or atomically replacing it.
///
/// Fails with [`Error::NotALink`] when `link` exists but is a regular file
/// or directory; those are never overwritten.
pub fn replace_link(link: &NormalizedPath, target: &Path) -> Result<()> {
    let native = link.to_native();

    if let Ok(meta) = fs::symlink_metadata(&native)
        && !meta.file_type().is_symlink()
    {
        return Err(Error::NotALink { path: native });
    }

    let temp = temp_path_for(&native);
    // Left over from an interrupted swap
    if fs::symlink_metadata(&temp).is_ok() {
        remove_symlink(&temp)?;
    }

    make_symlink(target, &temp)?;

    if let Err(e) = swap_into_place(&temp, &native) {
        let _ = remove_symlink(&temp);
        return Err(e);
    }
    Ok(())
}

/// Remove the symbolic link at `link`.
///
/// Regular files and directories are refused with [`Error::NotALink`].
pub fn remove_link(link: &NormalizedPath) -> Result<()> {
    let native = link.to_native();
    let meta = fs::symlink_metadata(&native).map_err(|e| Error::io(&native, e))?;
    if !meta.file_type().is_symlink() {
        return Err(Error::NotALink { path: native });
    }
    remove_symlink(&native)
}

/// Canonical form of `path`, or `None` when it does not resolve.
///
/// Uses `dunce` so Windows paths stay in their familiar non-UNC form.
pub fn canonical(path: &Path) -> Option<PathBuf> {
    dunce::canonicalize(path).ok()
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::unix::fs::symlink(target, link).map_err(|e| Error::io(link, e))
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> Result<()> {
    std::os::windows::fs::symlink_dir(target, link).map_err(|e| Error::io(link, e))
}

#[cfg(unix)]
fn swap_into_place(temp: &Path, link: &Path) -> Result<()> {
    // rename(2) replaces an existing symlink atomically
    fs::rename(temp, link).map_err(|e| Error::io(link, e))
}

#[cfg(windows)]
fn swap_into_place(temp: &Path, link: &Path) -> Result<()> {
    // Directory symlinks cannot be renamed over on Windows
    if fs::symlink_metadata(link).is_ok() {
        remove_symlink(link)?;
    }
    fs::rename(temp, link).map_err(|e| Error::io(link, e))
}

#[cfg(unix)]
fn remove_symlink(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}

#[cfg(windows)]
fn remove_symlink(path: &Path) -> Result<()> {
    fs::remove_dir(path)
        .or_else(|_| fs::remove_file(path))
        .map_err(|e| Error::io(path, e))
}

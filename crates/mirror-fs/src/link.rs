//! Mirror directory scanning
//!
//! Only symbolic links count as managed entries. Regular files and
//! sub-directories that end up in a mirror directory are invisible to the
//! reconciler and therefore never removed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::io::{self, is_temp_name};
use crate::{Error, NormalizedPath, Result};

/// A symbolic link found in a mirror directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEntry {
    /// File name of the link inside the mirror directory
    pub name: String,
    /// Raw link target as returned by `read_link`
    pub target: PathBuf,
}

impl LinkEntry {
    pub fn new(name: impl Into<String>, target: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }

    /// Canonical target, interpreting relative targets against `dir`.
    ///
    /// `None` for dangling links.
    pub fn resolved_target(&self, dir: &Path) -> Option<PathBuf> {
        if self.target.is_absolute() {
            io::canonical(&self.target)
        } else {
            io::canonical(&dir.join(&self.target))
        }
    }
}

/// Enumerate the symbolic links in `dir`, creating it first if absent.
///
/// Entries are returned sorted by name. Temporary links left behind by an
/// interrupted swap are never reported; with `cleanup` set they are also
/// deleted.
pub fn scan_links(dir: &NormalizedPath, cleanup: bool) -> Result<Vec<LinkEntry>> {
    let native = dir.to_native();
    fs::create_dir_all(&native).map_err(|e| Error::io(&native, e))?;

    let mut links = Vec::new();
    for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
        let entry = entry.map_err(|e| Error::io(&native, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if !file_type.is_symlink() {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            warn!(path = %path.display(), "Skipping link with non UTF-8 name");
            continue;
        };

        if is_temp_name(&name) {
            if !cleanup {
                debug!(path = %path.display(), "Skipping leftover temporary link");
                continue;
            }
            debug!(path = %path.display(), "Removing leftover temporary link");
            if let Err(e) = io::remove_link(&NormalizedPath::new(&path)) {
                warn!(path = %path.display(), error = %e, "Could not remove temporary link");
            }
            continue;
        }

        let target = fs::read_link(&path).map_err(|e| Error::io(&path, e))?;
        links.push(LinkEntry { name, target });
    }

    links.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(links)
}

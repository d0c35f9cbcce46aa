//! Link I/O seam

use std::path::Path;

use mirror_fs::{LinkEntry, NormalizedPath};

/// Filesystem operations the reconciler and cycle runner rely on.
pub trait LinkIo: Send + Sync {
    /// Enumerate managed links in `dir`, creating it if absent.
    ///
    /// Leftover temporary links are deleted only when `cleanup` is set.
    fn scan(&self, dir: &NormalizedPath, cleanup: bool) -> mirror_fs::Result<Vec<LinkEntry>>;

    /// Create or atomically replace `link` so it points at `target`.
    fn replace(&self, link: &NormalizedPath, target: &Path) -> mirror_fs::Result<()>;

    /// Remove the symbolic link `link`.
    fn remove(&self, link: &NormalizedPath) -> mirror_fs::Result<()>;
}

/// [`LinkIo`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLinkIo;

impl LinkIo for FsLinkIo {
    fn scan(&self, dir: &NormalizedPath, cleanup: bool) -> mirror_fs::Result<Vec<LinkEntry>> {
        mirror_fs::scan_links(dir, cleanup)
    }

    fn replace(&self, link: &NormalizedPath, target: &Path) -> mirror_fs::Result<()> {
        mirror_fs::io::replace_link(link, target)
    }

    fn remove(&self, link: &NormalizedPath) -> mirror_fs::Result<()> {
        mirror_fs::io::remove_link(link)
    }
}

impl<T: LinkIo + ?Sized> LinkIo for &T {
    fn scan(&self, dir: &NormalizedPath, cleanup: bool) -> mirror_fs::Result<Vec<LinkEntry>> {
        (**self).scan(dir, cleanup)
    }

    fn replace(&self, link: &NormalizedPath, target: &Path) -> mirror_fs::Result<()> {
        (**self).replace(link, target)
    }

    fn remove(&self, link: &NormalizedPath) -> mirror_fs::Result<()> {
        (**self).remove(link)
    }
}

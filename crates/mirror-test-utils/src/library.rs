//! [`MediaLibrary`] builder for mirror test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary media library with a sibling mirror area.
///
/// Layout:
///
/// ```text
/// <root>/media/movies/<title>/<title>.mkv
/// <root>/media/tv/<show>/Season 01/<show> S01E01.mkv
/// <root>/mirror/<collection>/
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use mirror_test_utils::library::MediaLibrary;
///
/// let library = MediaLibrary::new();
/// let file = library.add_movie("Heat (1995)");
/// let mirror = library.mirror_dir("trending");
/// library.link(&mirror, "Heat (1995).lnk", file.parent().unwrap());
/// ```
pub struct MediaLibrary {
    temp_dir: TempDir,
}

impl Default for MediaLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaLibrary {
    /// Create an empty library.
    ///
    /// # Panics
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        let temp_dir =
            TempDir::new().unwrap_or_else(|e| panic!("MediaLibrary: failed to create temp dir: {e}"));
        Self { temp_dir }
    }

    /// Root of the temporary tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding the media files.
    pub fn media_root(&self) -> PathBuf {
        self.root().join("media")
    }

    /// Create `media/movies/<title>/<title>.mkv` and return the file path.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn add_movie(&self, title: &str) -> PathBuf {
        let dir = self.media_root().join("movies").join(title);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("add_movie: failed to create {}: {e}", dir.display()));
        let file = dir.join(format!("{title}.mkv"));
        fs::write(&file, "movie")
            .unwrap_or_else(|e| panic!("add_movie: failed to write {}: {e}", file.display()));
        file
    }

    /// Create the first episode of a show and return the episode file path.
    ///
    /// # Panics
    /// Panics if the filesystem operations fail.
    pub fn add_show(&self, title: &str) -> PathBuf {
        let season = self.media_root().join("tv").join(title).join("Season 01");
        fs::create_dir_all(&season)
            .unwrap_or_else(|e| panic!("add_show: failed to create {}: {e}", season.display()));
        let file = season.join(format!("{title} S01E01.mkv"));
        fs::write(&file, "episode")
            .unwrap_or_else(|e| panic!("add_show: failed to write {}: {e}", file.display()));
        file
    }

    /// Path of a mirror directory, without creating it.
    pub fn mirror_path(&self, collection: &str) -> PathBuf {
        self.root().join("mirror").join(collection)
    }

    /// Create and return a mirror directory.
    ///
    /// # Panics
    /// Panics if the directory cannot be created.
    pub fn mirror_dir(&self, collection: &str) -> PathBuf {
        let dir = self.mirror_path(collection);
        fs::create_dir_all(&dir)
            .unwrap_or_else(|e| panic!("mirror_dir: failed to create {}: {e}", dir.display()));
        dir
    }

    /// Create a symlink `dir/name -> target`.
    ///
    /// # Panics
    /// Panics if the link cannot be created.
    pub fn link(&self, dir: &Path, name: &str, target: &Path) {
        let link = dir.join(name);
        make_symlink(target, &link)
            .unwrap_or_else(|e| panic!("link: failed to create {}: {e}", link.display()));
    }

    /// Sorted names of the symlinks in `dir`.
    ///
    /// # Panics
    /// Panics if the directory cannot be read.
    pub fn link_names(&self, dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap_or_else(|e| panic!("link_names: failed to read {}: {e}", dir.display()))
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_symlink()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Canonical target of the link `dir/name`, or `None` if absent or dangling.
    pub fn link_target(&self, dir: &Path, name: &str) -> Option<PathBuf> {
        fs::canonicalize(dir.join(name)).ok()
    }
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> std::io::Result<()> {
    std::os::windows::fs::symlink_dir(target, link)
}

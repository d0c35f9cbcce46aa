//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Repeated separators collapse, `.` segments vanish and `..` segments pop
/// their parent where one exists. Backslashes are separators only on Windows
/// or in Windows-style paths (drive letter or `\\server` prefix); elsewhere
/// they are ordinary file name characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        if cfg!(windows) {
            return Self::from_windows(&raw);
        }
        let cleaned = clean(&raw);
        if is_windows_style(&cleaned) {
            Self::from_windows(&cleaned)
        } else {
            Self { inner: cleaned }
        }
    }

    /// Create a NormalizedPath treating every backslash as a separator.
    ///
    /// For paths known to come from a Windows host, including ones whose
    /// prefix has already been rewritten to a local mount.
    pub fn from_windows(path: &str) -> Self {
        Self {
            inner: clean(&path.replace('\\', "/")),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        let segment = if cfg!(windows) {
            segment.replace('\\', "/")
        } else {
            segment.to_string()
        };
        let joined = if self.inner.ends_with('/') {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self {
            inner: clean(&joined),
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        self.drop_last(1)
    }

    /// Drop the last `count` components.
    ///
    /// Returns `None` when fewer than `count + 1` named components exist, so
    /// the result always names a real directory rather than a bare root.
    pub fn drop_last(&self, count: usize) -> Option<Self> {
        let (prefix, rest) = split_prefix(&self.inner);
        let components: Vec<&str> = rest.split('/').filter(|c| !c.is_empty()).collect();
        let keep = components.len().checked_sub(count)?;
        if keep == 0 {
            return None;
        }
        Some(Self {
            inner: format!("{}{}", prefix, components[..keep].join("/")),
        })
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let (_, rest) = split_prefix(&self.inner);
        rest.rsplit('/').next().filter(|name| !name.is_empty() && *name != ".")
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Whether `path` is written in Windows form: `C:\\...`, `C:/...`, a bare `C:`
/// or a `\\\\server\\share` network path.
pub fn is_windows_style(path: &str) -> bool {
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && matches!(bytes.get(2), None | Some(b'\\') | Some(b'/'));
    drive || path.starts_with("\\\\")
}

/// Split a cleaned path into its root prefix (`/`, `//` or empty) and the rest.
fn split_prefix(path: &str) -> (&str, &str) {
    if let Some(rest) = path.strip_prefix("//") {
        ("//", rest)
    } else if let Some(rest) = path.strip_prefix('/') {
        ("/", rest)
    } else {
        ("", path)
    }
}

fn clean(raw: &str) -> String {
    let prefix = if raw.starts_with("//") && !raw.starts_with("///") {
        "//"
    } else if raw.starts_with('/') {
        "/"
    } else {
        ""
    };
    let rooted = !prefix.is_empty();

    let mut parts: Vec<&str> = Vec::new();
    for part in raw.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` above the root is the root
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() && !rooted {
        return ".".to_string();
    }
    format!("{}{}", prefix, parts.join("/"))
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

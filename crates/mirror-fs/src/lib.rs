//! Filesystem layer for Collection Mirror
//!
//! Provides the normalized path type, the mirror directory scanner,
//! atomic symlink operations and format-agnostic configuration loading.

pub mod config;
pub mod error;
pub mod io;
pub mod link;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use link::{LinkEntry, scan_links};
pub use path::{NormalizedPath, is_windows_style};

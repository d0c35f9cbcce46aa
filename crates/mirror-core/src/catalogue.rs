//! Catalogue client seam
//!
//! The reconciler never talks to a media server directly. Anything that can
//! list a collection and report media file paths implements
//! [`CatalogueClient`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Kind of a catalogue item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// Leaf item whose media file sits directly in its own directory
    #[default]
    Movie,
    /// Container item laid out as `<show>/<season>/<episode file>`
    Show,
}

impl ItemKind {
    /// Number of trailing path components to drop from a media file path
    /// to reach the directory that gets linked.
    pub fn containment_depth(&self) -> usize {
        match self {
            ItemKind::Movie => 1,
            ItemKind::Show => 2,
        }
    }
}

impl FromStr for ItemKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(ItemKind::Movie),
            "show" | "shows" | "series" | "tv" => Ok(ItemKind::Show),
            _ => Err(Error::invalid_config(format!("unknown item kind: {}", s))),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Movie => write!(f, "movie"),
            ItemKind::Show => write!(f, "show"),
        }
    }
}

/// A member of a collection as reported by the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    /// Media file path when the listing already carries it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl CatalogueItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            path: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Read access to a media catalogue.
///
/// Every method fails with [`Error::Upstream`] on transport failure,
/// non-success status or malformed payload.
pub trait CatalogueClient: Send + Sync {
    /// Look up a collection ID by its exact display name.
    fn find_collection(&self, name: &str) -> Result<Option<String>>;

    /// List the members of a collection.
    fn list_collection_items(&self, collection_id: &str) -> Result<Vec<CatalogueItem>>;

    /// First episode of a show, by the catalogue's own ordering.
    fn first_episode(&self, show: &CatalogueItem) -> Result<Option<CatalogueItem>>;

    /// Path of the primary media file of a leaf item.
    fn media_path(&self, leaf: &CatalogueItem) -> Result<Option<String>>;
}

macro_rules! forward_catalogue_client {
    ($($ptr:ty),+) => {$(
        impl<T: CatalogueClient + ?Sized> CatalogueClient for $ptr {
            fn find_collection(&self, name: &str) -> Result<Option<String>> {
                (**self).find_collection(name)
            }

            fn list_collection_items(&self, collection_id: &str) -> Result<Vec<CatalogueItem>> {
                (**self).list_collection_items(collection_id)
            }

            fn first_episode(&self, show: &CatalogueItem) -> Result<Option<CatalogueItem>> {
                (**self).first_episode(show)
            }

            fn media_path(&self, leaf: &CatalogueItem) -> Result<Option<String>> {
                (**self).media_path(leaf)
            }
        }
    )+};
}

forward_catalogue_client!(&T, Box<T>, Arc<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_depth() {
        assert_eq!(ItemKind::Movie.containment_depth(), 1);
        assert_eq!(ItemKind::Show.containment_depth(), 2);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Movies".parse::<ItemKind>().unwrap(), ItemKind::Movie);
        assert_eq!("series".parse::<ItemKind>().unwrap(), ItemKind::Show);
        assert_eq!("tv".parse::<ItemKind>().unwrap(), ItemKind::Show);
        assert!("music".parse::<ItemKind>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kind in [ItemKind::Movie, ItemKind::Show] {
            assert_eq!(kind.to_string().parse::<ItemKind>().unwrap(), kind);
        }
    }
}

//! Item to source directory resolution

use std::path::PathBuf;

use mirror_fs::{NormalizedPath, is_windows_style};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;
use crate::catalogue::{CatalogueClient, CatalogueItem, ItemKind};
use crate::mapping::PathMapper;

/// Why an item could not be turned into a link target.
///
/// Unresolved items are left out of the desired set, so a link of the same
/// name is removed by the reconciler.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ResolutionFailure {
    #[error("catalogue reports no media path")]
    NoMediaPath,

    #[error("show has no episodes")]
    NoEpisodes,

    #[error("media path {path} has too few components to derive a directory")]
    TooShallow { path: String },

    #[error("source directory {} does not exist locally", .path.display())]
    SourceMissing { path: PathBuf },

    #[error("name {name:?} leaves nothing after sanitizing")]
    EmptyName { name: String },
}

/// An item paired with the local directory its link should point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub item: CatalogueItem,
    pub source: std::result::Result<PathBuf, ResolutionFailure>,
}

/// Resolve the local directory for `item`.
///
/// Movies resolve their own media file; shows resolve their first episode.
/// The file path is rewritten by `mapper`, trimmed to its containing
/// directory (one component for movies, two for shows) and must exist.
///
/// Only upstream errors are returned as `Err`; everything else is reported
/// through [`ResolvedPath::source`].
pub fn resolve_source_dir<C>(
    client: &C,
    item: CatalogueItem,
    mapper: &PathMapper,
) -> Result<ResolvedPath>
where
    C: CatalogueClient + ?Sized,
{
    let leaf_path = match item.kind {
        ItemKind::Movie => client.media_path(&item)?,
        ItemKind::Show => match client.first_episode(&item)? {
            Some(episode) => client.media_path(&episode)?,
            None => return Ok(unresolved(item, ResolutionFailure::NoEpisodes)),
        },
    };

    let Some(raw) = leaf_path else {
        return Ok(unresolved(item, ResolutionFailure::NoMediaPath));
    };

    // A Windows server's separators stay separators after the prefix rewrite
    let mapped = mapper.map(&raw);
    let file = if is_windows_style(&raw) {
        NormalizedPath::from_windows(&mapped)
    } else {
        NormalizedPath::new(&mapped)
    };
    let Some(dir) = file.drop_last(item.kind.containment_depth()) else {
        return Ok(unresolved(item, ResolutionFailure::TooShallow { path: mapped }));
    };

    if !dir.is_dir() {
        return Ok(unresolved(
            item,
            ResolutionFailure::SourceMissing {
                path: dir.to_native(),
            },
        ));
    }

    debug!(item = %item.name, source = %dir, "Resolved source directory");
    Ok(ResolvedPath {
        item,
        source: Ok(dir.to_native()),
    })
}

fn unresolved(item: CatalogueItem, failure: ResolutionFailure) -> ResolvedPath {
    ResolvedPath {
        item,
        source: Err(failure),
    }
}

//! Wire models for the subset of the Emby API the client reads

use mirror_core::{CatalogueItem, ItemKind};
use serde::Deserialize;

/// `{"Items": [...]}` envelope shared by the list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<BaseItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct BaseItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "Type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl BaseItem {
    pub fn kind(&self) -> ItemKind {
        match self.item_type.as_deref() {
            Some("Series") => ItemKind::Show,
            _ => ItemKind::Movie,
        }
    }

    pub fn into_item(self) -> CatalogueItem {
        let kind = self.kind();
        let item = CatalogueItem::new(self.id, self.name, kind);
        match self.path.filter(|p| !p.is_empty()) {
            Some(path) => item.with_path(path),
            None => item,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct PlaybackInfo {
    #[serde(default)]
    pub media_sources: Vec<MediaSource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MediaSource {
    #[serde(default)]
    pub path: Option<String>,
}

//! Blocking HTTP client for the Emby catalogue API

use std::time::Duration;

use mirror_core::{CatalogueClient, CatalogueItem, ServerConfig};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{BaseItem, ItemsResponse, PlaybackInfo};

/// Catalogue client talking to an Emby (or Jellyfin) server.
///
/// The API key travels as the `api_key` query parameter on every request.
/// Errors never include the full request URL.
#[derive(Debug, Clone)]
pub struct EmbyClient {
    base: Url,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl EmbyClient {
    /// Create a client for the server at `base_url`.
    ///
    /// Must not be called from inside an async runtime; the underlying
    /// blocking client owns its own.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base,
            api_key: api_key.into(),
            http,
        })
    }

    pub fn from_config(server: &ServerConfig) -> Result<Self> {
        Self::new(&server.url, server.api_key.clone(), server.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// All collections visible to the API key.
    pub fn collections(&self) -> Result<Vec<CatalogueItem>> {
        let response: ItemsResponse = self.get(&["emby", "Collections"], &[])?;
        Ok(response.items.into_iter().map(BaseItem::into_item).collect())
    }

    pub fn collection_items(&self, collection_id: &str) -> Result<Vec<CatalogueItem>> {
        let response: ItemsResponse = self.get(
            &["emby", "Collections", collection_id, "Items"],
            &[("Fields", "Path")],
        )?;
        Ok(response.items.into_iter().map(BaseItem::into_item).collect())
    }

    pub fn first_episode_of(&self, show_id: &str) -> Result<Option<CatalogueItem>> {
        let response: ItemsResponse = self.get(
            &["emby", "Shows", show_id, "Episodes"],
            &[("Fields", "Path"), ("Limit", "1")],
        )?;
        Ok(response.items.into_iter().next().map(BaseItem::into_item))
    }

    /// Path of the first media source the server would play for `item_id`.
    pub fn playback_path(&self, item_id: &str) -> Result<Option<String>> {
        let info: PlaybackInfo = self.get(&["emby", "Items", item_id, "PlaybackInfo"], &[])?;
        Ok(info
            .media_sources
            .into_iter()
            .next()
            .and_then(|source| source.path)
            .filter(|path| !path.is_empty()))
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        let mut pairs: Vec<(&str, &str)> = query.to_vec();
        if !self.api_key.is_empty() {
            pairs.push(("api_key", self.api_key.as_str()));
        }
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<T> {
        let endpoint = format!("/{}", segments.join("/"));
        let url = self.endpoint(segments, query);
        debug!(endpoint = %endpoint, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| Error::Http(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        response.json().map_err(|e| Error::Http(e.without_url()))
    }
}

impl CatalogueClient for EmbyClient {
    fn find_collection(&self, name: &str) -> mirror_core::Result<Option<String>> {
        let found = self
            .collections()?
            .into_iter()
            .find(|collection| collection.name == name)
            .map(|collection| collection.id);
        Ok(found)
    }

    fn list_collection_items(&self, collection_id: &str) -> mirror_core::Result<Vec<CatalogueItem>> {
        Ok(self.collection_items(collection_id)?)
    }

    fn first_episode(&self, show: &CatalogueItem) -> mirror_core::Result<Option<CatalogueItem>> {
        Ok(self.first_episode_of(&show.id)?)
    }

    fn media_path(&self, leaf: &CatalogueItem) -> mirror_core::Result<Option<String>> {
        if let Some(path) = &leaf.path {
            return Ok(Some(path.clone()));
        }
        Ok(self.playback_path(&leaf.id)?)
    }
}

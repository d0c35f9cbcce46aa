//! Emby catalogue client for Collection Mirror
//!
//! Implements [`mirror_core::CatalogueClient`] over the Emby HTTP API
//! (Jellyfin serves the same `/emby/...` routes). Requests are blocking so the
//! client can be driven from the synchronous cycle runner.

pub mod client;
pub mod error;
mod types;

pub use client::EmbyClient;
pub use error::{Error, Result};

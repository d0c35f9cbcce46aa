//! Reconciliation engine for Collection Mirror
//!
//! Mirrors the membership of media-server collections into flat directories
//! of symbolic links:
//!
//! - **sanitize**: display name to link file name
//! - **mapping**: server path prefixes to local mount prefixes
//! - **catalogue**: the [`CatalogueClient`] seam and item model
//! - **resolve**: item to local source directory
//! - **reconcile**: minimal link changes for one directory
//! - **cycle**: one pass over every configured collection
//!
//! # Architecture
//!
//! ```text
//!              mirror-cli
//!                  |
//!     +------------+------------+
//!     |                         |
//! mirror-core  <-- trait --  mirror-emby
//!     |
//! mirror-fs
//! ```
//!
//! The crate is schedule-agnostic: callers invoke
//! [`CycleRunner::run_cycle`] whenever a refresh is due. It assumes it is
//! the only writer of the mirror directories and takes no locks.

pub mod cancel;
pub mod catalogue;
pub mod config;
pub mod cycle;
pub mod error;
pub mod mapping;
pub mod reconcile;
pub mod resolve;
pub mod sanitize;

pub use cancel::CancelToken;
pub use catalogue::{CatalogueClient, CatalogueItem, ItemKind};
pub use config::{CollectionSpec, MirrorConfig, ScheduleConfig, ServerConfig};
pub use cycle::{
    CollectionOutcome, CollectionReport, CycleReport, CycleRunner, OutcomeStatus, UnresolvedItem,
};
pub use error::{Error, Result};
pub use mapping::{PathMapper, PathRule, map_path};
pub use reconcile::{
    DesiredSet, FsLinkIo, LinkAction, LinkChange, LinkFailure, LinkIo, ReconcileOptions,
    ReconcileReport, Reconciler,
};
pub use resolve::{ResolutionFailure, ResolvedPath, resolve_source_dir};
pub use sanitize::{LINK_SUFFIX, link_name, sanitize};

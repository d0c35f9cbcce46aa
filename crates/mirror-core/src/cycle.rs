//! One refresh cycle over every configured collection

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::cancel::CancelToken;
use crate::catalogue::{CatalogueClient, ItemKind};
use crate::config::{CollectionSpec, MirrorConfig};
use crate::mapping::PathMapper;
use crate::reconcile::{
    DesiredSet, FsLinkIo, LinkIo, ReconcileOptions, ReconcileReport, Reconciler,
};
use crate::resolve::{ResolutionFailure, resolve_source_dir};
use crate::sanitize::link_name;
use crate::{Error, Result};

/// A collection member that was left out of the desired set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedItem {
    pub id: String,
    pub name: String,
    pub reason: ResolutionFailure,
}

/// Result of mirroring one collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionReport {
    /// Catalogue ID the collection resolved to
    pub collection_id: String,
    /// Number of members listed by the catalogue
    pub items: usize,
    pub unresolved: Vec<UnresolvedItem>,
    pub reconcile: ReconcileReport,
}

/// How a collection fared in a cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeStatus {
    Synced(CollectionReport),
    Failed { error: String },
    Cancelled,
}

/// Per-collection entry of a [`CycleReport`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionOutcome {
    pub collection: String,
    pub kind: ItemKind,
    pub target: PathBuf,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl CollectionOutcome {
    pub fn report(&self) -> Option<&CollectionReport> {
        match &self.status {
            OutcomeStatus::Synced(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed { .. })
    }
}

/// Outcome of one full cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub outcomes: Vec<CollectionOutcome>,
}

impl CycleReport {
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failed()).count()
    }

    /// Every collection synced without failures.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| {
            o.report()
                .map(|r| r.reconcile.is_clean())
                .unwrap_or(false)
        })
    }

    /// Any collection directory differed from its desired state.
    pub fn has_drift(&self) -> bool {
        self.outcomes
            .iter()
            .filter_map(CollectionOutcome::report)
            .any(|r| r.reconcile.has_drift())
    }

    pub fn was_cancelled(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(o.status, OutcomeStatus::Cancelled)
                || o.report().is_some_and(|r| r.reconcile.cancelled)
        })
    }
}

/// Runs reconciliation for every configured collection.
///
/// Holds the immutable configuration; each call to [`run_cycle`](Self::run_cycle)
/// starts from a fresh catalogue listing and a fresh directory scan.
pub struct CycleRunner<C, L = FsLinkIo> {
    config: MirrorConfig,
    mapper: PathMapper,
    client: C,
    links: L,
    options: ReconcileOptions,
}

impl<C: CatalogueClient> CycleRunner<C, FsLinkIo> {
    pub fn new(config: MirrorConfig, client: C) -> Self {
        Self::with_link_io(config, client, FsLinkIo)
    }
}

impl<C: CatalogueClient, L: LinkIo> CycleRunner<C, L> {
    pub fn with_link_io(config: MirrorConfig, client: C, links: L) -> Self {
        let mapper = PathMapper::new(config.path_rules.clone());
        Self {
            config,
            mapper,
            client,
            links,
            options: ReconcileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReconcileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Mirror every configured collection, one after another.
    ///
    /// A failing collection is recorded and the next one still runs.
    pub fn run_cycle(&self, cancel: &CancelToken) -> CycleReport {
        let started_at = Utc::now();
        info!(
            collections = self.config.collections.len(),
            dry_run = self.options.dry_run,
            "Starting mirror cycle"
        );

        let mut outcomes = Vec::with_capacity(self.config.collections.len());
        for spec in &self.config.collections {
            let status = if cancel.is_cancelled() {
                OutcomeStatus::Cancelled
            } else {
                match self.run_collection(spec, cancel) {
                    Ok(report) => OutcomeStatus::Synced(report),
                    Err(Error::Cancelled) => OutcomeStatus::Cancelled,
                    Err(e) => {
                        error!(collection = %spec.label(), error = %e, "Collection failed");
                        OutcomeStatus::Failed {
                            error: e.to_string(),
                        }
                    }
                }
            };

            outcomes.push(CollectionOutcome {
                collection: spec.label().to_string(),
                kind: spec.kind,
                target: spec.target.clone(),
                status,
            });
        }

        let report = CycleReport {
            started_at,
            finished_at: Utc::now(),
            outcomes,
        };
        info!(
            failed = report.failed_count(),
            cancelled = report.was_cancelled(),
            "Mirror cycle finished"
        );
        report
    }

    /// Mirror a single collection.
    pub fn run_collection(
        &self,
        spec: &CollectionSpec,
        cancel: &CancelToken,
    ) -> Result<CollectionReport> {
        let collection_id = self.collection_id(spec)?;
        let items = self.client.list_collection_items(&collection_id)?;
        info!(
            collection = %spec.label(),
            kind = %spec.kind,
            items = items.len(),
            "Listed collection"
        );
        let item_count = items.len();

        let mut desired = DesiredSet::new();
        let mut unresolved = Vec::new();
        for item in items {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let Some(name) = link_name(&item.name) else {
                warn!(
                    collection = %spec.label(),
                    item = %item.id,
                    "Item name is empty after sanitizing"
                );
                unresolved.push(UnresolvedItem {
                    reason: ResolutionFailure::EmptyName {
                        name: item.name.clone(),
                    },
                    id: item.id,
                    name: item.name,
                });
                continue;
            };

            let resolved = resolve_source_dir(&self.client, item, &self.mapper)?;
            match resolved.source {
                Ok(source) => {
                    if let Some(previous) = desired.insert(name.clone(), source) {
                        warn!(
                            collection = %spec.label(),
                            link = %name,
                            replaced = %previous.display(),
                            "Sanitized name collision, later item wins"
                        );
                    }
                }
                Err(reason) => {
                    warn!(
                        collection = %spec.label(),
                        item = %resolved.item.name,
                        reason = %reason,
                        "Skipping unresolved item"
                    );
                    unresolved.push(UnresolvedItem {
                        id: resolved.item.id,
                        name: resolved.item.name,
                        reason,
                    });
                }
            }
        }

        let dir = spec.target_dir();
        let actual = if self.options.dry_run && !dir.exists() {
            Vec::new()
        } else {
            // A dry run leaves interrupted swaps in place
            self.links.scan(&dir, !self.options.dry_run)?
        };

        let reconcile =
            Reconciler::new(&self.links, self.options).reconcile(&desired, &actual, &dir, cancel);
        info!(
            collection = %spec.label(),
            created = reconcile.created(),
            replaced = reconcile.replaced(),
            removed = reconcile.removed(),
            unchanged = reconcile.unchanged(),
            failed = reconcile.failures.len(),
            "Collection reconciled"
        );

        Ok(CollectionReport {
            collection_id,
            items: item_count,
            unresolved,
            reconcile,
        })
    }

    fn collection_id(&self, spec: &CollectionSpec) -> Result<String> {
        if let Some(id) = &spec.id {
            return Ok(id.clone());
        }
        let name = spec
            .name
            .as_deref()
            .ok_or_else(|| Error::invalid_config("collection has neither id nor name"))?;
        self.client
            .find_collection(name)?
            .ok_or_else(|| Error::CollectionNotFound {
                name: name.to_string(),
            })
    }
}

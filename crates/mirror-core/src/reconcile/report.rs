//! Report types for a single reconciliation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What happened to one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAction {
    /// No link of that name existed; one was created
    Created,
    /// A link existed with a different target and was swapped
    Replaced,
    /// A link existed that is no longer desired
    Removed,
    /// The link already pointed at the desired target
    Unchanged,
}

impl LinkAction {
    /// Whether applying this action writes to the filesystem.
    pub fn is_write(&self) -> bool {
        !matches!(self, LinkAction::Unchanged)
    }
}

/// A single applied (or, in dry-run mode, planned) action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkChange {
    pub name: String,
    pub action: LinkAction,
    /// Desired target; absent for removals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
}

/// An entry that could not be brought in line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of reconciling one mirror directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Actions were planned but not applied
    pub dry_run: bool,
    /// The pass stopped early because the cycle was cancelled
    pub cancelled: bool,
    pub changes: Vec<LinkChange>,
    pub failures: Vec<LinkFailure>,
}

impl ReconcileReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, name: &str, action: LinkAction, target: Option<PathBuf>) {
        self.changes.push(LinkChange {
            name: name.to_string(),
            action,
            target,
        });
    }

    pub(crate) fn fail(&mut self, name: &str, reason: impl Into<String>) {
        self.failures.push(LinkFailure {
            name: name.to_string(),
            reason: reason.into(),
        });
    }

    /// Number of entries that ended with `action`.
    pub fn count(&self, action: LinkAction) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    pub fn created(&self) -> usize {
        self.count(LinkAction::Created)
    }

    pub fn replaced(&self) -> usize {
        self.count(LinkAction::Replaced)
    }

    pub fn removed(&self) -> usize {
        self.count(LinkAction::Removed)
    }

    pub fn unchanged(&self) -> usize {
        self.count(LinkAction::Unchanged)
    }

    /// Whether the directory differed from the desired state.
    pub fn has_drift(&self) -> bool {
        self.changes.iter().any(|c| c.action.is_write())
    }

    /// Filesystem writes actually performed.
    pub fn writes(&self) -> usize {
        if self.dry_run {
            0
        } else {
            self.changes.iter().filter(|c| c.action.is_write()).count()
        }
    }

    /// No per-entry failures and not cancelled.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

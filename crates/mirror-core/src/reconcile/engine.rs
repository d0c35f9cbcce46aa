//! Reconciler implementation
//!
//! Brings a mirror directory in line with a desired `link name -> target`
//! mapping using the fewest filesystem writes: links whose canonical target
//! already matches are never touched.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use mirror_fs::{LinkEntry, NormalizedPath};
use tracing::{debug, info, warn};

use super::io::LinkIo;
use super::report::{LinkAction, ReconcileReport};
use crate::cancel::CancelToken;

/// Desired state of one mirror directory, keyed by link file name.
///
/// Inserting a name twice keeps the later target.
pub type DesiredSet = BTreeMap<String, PathBuf>;

/// Options for a reconciliation pass
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Plan and report actions without touching the filesystem.
    pub dry_run: bool,
}

/// Applies a [`DesiredSet`] to a mirror directory through a [`LinkIo`].
pub struct Reconciler<'a, L: LinkIo + ?Sized> {
    links: &'a L,
    options: ReconcileOptions,
}

impl<'a, L: LinkIo + ?Sized> Reconciler<'a, L> {
    pub fn new(links: &'a L, options: ReconcileOptions) -> Self {
        Self { links, options }
    }

    /// Reconcile `dir` so its links match `desired` exactly.
    ///
    /// `actual` is the scan of `dir` taken just before. Pass one creates or
    /// replaces every desired link whose canonical target differs; pass two
    /// removes every link not in `desired`. Failures are recorded per entry
    /// and never stop the pass. Cancellation is honoured between entries.
    ///
    /// A desired target that does not exist locally is not linked. The entry
    /// is reported as a failure and any existing link of that name is left
    /// alone.
    pub fn reconcile(
        &self,
        desired: &DesiredSet,
        actual: &[LinkEntry],
        dir: &NormalizedPath,
        cancel: &CancelToken,
    ) -> ReconcileReport {
        let mut report = ReconcileReport::new(self.options.dry_run);
        let native_dir = dir.to_native();
        let existing: HashMap<&str, &LinkEntry> =
            actual.iter().map(|entry| (entry.name.as_str(), entry)).collect();

        for (name, target) in desired {
            if cancel.is_cancelled() {
                report.cancelled = true;
                return report;
            }
            self.apply_desired(
                &mut report,
                dir,
                &native_dir,
                name,
                target,
                existing.get(name.as_str()),
            );
        }

        for entry in actual {
            if desired.contains_key(&entry.name) {
                continue;
            }
            if cancel.is_cancelled() {
                report.cancelled = true;
                return report;
            }
            self.remove_stale(&mut report, dir, entry);
        }

        report
    }

    fn apply_desired(
        &self,
        report: &mut ReconcileReport,
        dir: &NormalizedPath,
        native_dir: &Path,
        name: &str,
        target: &Path,
        existing: Option<&&LinkEntry>,
    ) {
        if !is_valid_link_name(name) {
            warn!(link = %name, "Invalid link name, skipping");
            report.fail(name, "invalid link name");
            return;
        }

        let Some(wanted) = mirror_fs::io::canonical(target) else {
            warn!(link = %name, target = %target.display(), "Source does not exist, skipping");
            report.fail(name, format!("source {} does not exist", target.display()));
            return;
        };

        let action = match existing {
            None => LinkAction::Created,
            Some(entry) if entry.resolved_target(native_dir).as_ref() == Some(&wanted) => {
                debug!(link = %name, target = %wanted.display(), "Link up to date");
                report.record(name, LinkAction::Unchanged, Some(target.to_path_buf()));
                return;
            }
            Some(_) => LinkAction::Replaced,
        };

        let link_target = if target.is_absolute() { target } else { wanted.as_path() };
        let link = dir.join(name);

        if self.options.dry_run {
            info!(link = %name, target = %link_target.display(), action = ?action, "[dry-run] Would update link");
            report.record(name, action, Some(target.to_path_buf()));
            return;
        }

        match self.links.replace(&link, link_target) {
            Ok(()) => {
                info!(link = %name, target = %link_target.display(), action = ?action, "Link updated");
                report.record(name, action, Some(target.to_path_buf()));
            }
            Err(e) => {
                warn!(link = %name, error = %e, "Failed to write link");
                report.fail(name, e.to_string());
            }
        }
    }

    fn remove_stale(&self, report: &mut ReconcileReport, dir: &NormalizedPath, entry: &LinkEntry) {
        let name = entry.name.as_str();

        if self.options.dry_run {
            info!(link = %name, "[dry-run] Would remove stale link");
            report.record(name, LinkAction::Removed, None);
            return;
        }

        match self.links.remove(&dir.join(name)) {
            Ok(()) => {
                info!(link = %name, "Removed stale link");
                report.record(name, LinkAction::Removed, None);
            }
            Err(e) => {
                warn!(link = %name, error = %e, "Failed to remove stale link");
                report.fail(name, e.to_string());
            }
        }
    }
}

/// A link name must be a single plain path component.
fn is_valid_link_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !mirror_fs::io::is_temp_name(name)
}

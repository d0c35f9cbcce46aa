//! Reconciliation of a mirror directory against a desired link set
//!
//! This module provides:
//! - **engine**: the [`Reconciler`] that plans and applies link changes
//! - **io**: the [`LinkIo`] seam through which every filesystem write goes
//! - **report**: per-entry actions and failures of one reconciliation

mod engine;
mod io;
mod report;

pub use engine::{DesiredSet, ReconcileOptions, Reconciler};
pub use io::{FsLinkIo, LinkIo};
pub use report::{LinkAction, LinkChange, LinkFailure, ReconcileReport};

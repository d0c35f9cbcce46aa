//! Shared test utilities for the collection-mirror workspace.
//!
//! This crate provides standardised fixtures so crate test suites do not
//! each rebuild a fake media library. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`library`]: [`MediaLibrary`](library::MediaLibrary) builder for media
//!   trees and mirror directories

pub mod library;

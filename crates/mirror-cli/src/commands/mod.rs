//! Command implementations for mirror-cli

pub mod check;
pub mod output;
pub mod run;
pub mod sync;
pub mod validate;

use std::path::Path;

use mirror_core::MirrorConfig;
use mirror_fs::NormalizedPath;
use tracing::debug;

use crate::error::{CliError, Result};

pub use check::run_check;
pub use run::run_scheduled;
pub use sync::run_sync;
pub use validate::run_validate;

/// Load and validate the configuration at `path`.
///
/// A non-empty `api_key` replaces the configured one.
pub fn load_config(path: &Path, api_key: Option<&str>) -> Result<MirrorConfig> {
    if !path.is_file() {
        return Err(CliError::user(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let mut config = MirrorConfig::load(&NormalizedPath::new(path))?;
    if let Some(key) = api_key.filter(|key| !key.is_empty()) {
        debug!("Using API key from command line or environment");
        config.server.api_key = key.to_string();
    }
    Ok(config)
}

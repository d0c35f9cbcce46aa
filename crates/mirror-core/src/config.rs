//! Configuration types and loading for Collection Mirror
//!
//! A [`MirrorConfig`] is loaded once and handed to the
//! [`CycleRunner`](crate::CycleRunner) by value. Nothing in the core reads
//! configuration from anywhere else.

use std::path::PathBuf;
use std::time::Duration;

use mirror_fs::{ConfigStore, NormalizedPath};
use serde::{Deserialize, Serialize};

use crate::catalogue::ItemKind;
use crate::mapping::PathRule;
use crate::{Error, Result};

/// Six hours, the historical refresh interval.
pub const DEFAULT_INTERVAL_SECS: u64 = 6 * 60 * 60;

/// Default HTTP timeout for catalogue requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Media server connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `http://emby.local:8096`
    pub url: String,
    /// API key sent with every request
    #[serde(default)]
    pub api_key: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Refresh schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

impl ScheduleConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// One mirrored collection.
///
/// Exactly one of `id` and `name` must be set. A name is looked up on the
/// catalogue at the start of every cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Directory that receives the links
    pub target: PathBuf,
    /// Kind of items in the collection, used for log context
    #[serde(default)]
    pub kind: ItemKind,
}

impl CollectionSpec {
    pub fn by_id(id: impl Into<String>, target: impl Into<PathBuf>, kind: ItemKind) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            target: target.into(),
            kind,
        }
    }

    pub fn by_name(name: impl Into<String>, target: impl Into<PathBuf>, kind: ItemKind) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            target: target.into(),
            kind,
        }
    }

    /// Human readable label for logs and reports.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }

    pub fn target_dir(&self) -> NormalizedPath {
        NormalizedPath::new(&self.target)
    }
}

/// Complete Collection Mirror configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub collections: Vec<CollectionSpec>,
    /// Prefix rewrites applied to catalogue paths, first match wins
    #[serde(default)]
    pub path_rules: Vec<PathRule>,
}

impl MirrorConfig {
    /// Load and validate configuration from a `.toml`, `.json` or `.yaml` file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.server.url.trim().is_empty() {
            return Err(Error::invalid_config("server.url must not be empty"));
        }
        if self.schedule.interval_secs == 0 {
            return Err(Error::invalid_config("schedule.interval_secs must be positive"));
        }
        if self.collections.is_empty() {
            return Err(Error::invalid_config("no collections configured"));
        }

        for (index, spec) in self.collections.iter().enumerate() {
            match (&spec.id, &spec.name) {
                (Some(_), Some(_)) => {
                    return Err(Error::invalid_config(format!(
                        "collections[{}]: set either id or name, not both",
                        index
                    )));
                }
                (None, None) => {
                    return Err(Error::invalid_config(format!(
                        "collections[{}]: id or name is required",
                        index
                    )));
                }
                _ => {}
            }
            if spec.target.as_os_str().is_empty() {
                return Err(Error::invalid_config(format!(
                    "collections[{}]: target must not be empty",
                    index
                )));
            }
        }

        if let Some(index) = self.path_rules.iter().position(|rule| rule.from.is_empty()) {
            return Err(Error::invalid_config(format!(
                "path_rules[{}]: from must not be empty",
                index
            )));
        }

        Ok(())
    }
}

fn default_interval_secs() -> u64 {
    DEFAULT_INTERVAL_SECS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal() -> MirrorConfig {
        MirrorConfig {
            server: ServerConfig {
                url: "http://emby:8096".into(),
                api_key: "key".into(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
            schedule: ScheduleConfig::default(),
            collections: vec![CollectionSpec::by_name("trending", "/mirror", ItemKind::Movie)],
            path_rules: Vec::new(),
        }
    }

    #[test]
    fn test_minimal_is_valid() {
        assert!(minimal().validate().is_ok());
    }

    #[test]
    fn test_default_interval_is_six_hours() {
        assert_eq!(ScheduleConfig::default().interval(), Duration::from_secs(21_600));
    }

    #[test]
    fn test_rejects_both_id_and_name() {
        let mut config = minimal();
        config.collections[0].id = Some("42".into());
        assert!(matches!(config.validate(), Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_rejects_missing_identifier() {
        let mut config = minimal();
        config.collections[0].name = None;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_rule_prefix() {
        let mut config = minimal();
        config.path_rules.push(PathRule::new("", "/mnt"));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_label_prefers_name() {
        let spec = CollectionSpec::by_id("42", "/m", ItemKind::Show);
        assert_eq!(spec.label(), "42");
        let spec = CollectionSpec::by_name("trending", "/m", ItemKind::Show);
        assert_eq!(spec.label(), "trending");
    }
}

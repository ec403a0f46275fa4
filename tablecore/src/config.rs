//! Summarizer defaults, loadable from JSON.
use crate::{aggregate::ResolutionPolicy, error::Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Settings consulted by the [`Summarizer`](crate::aggregate::Summarizer).
///
/// Every field has a default, so a partial JSON document (or `{}`) is valid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How columns are paired with aggregate functions when none is given.
    pub policy: ResolutionPolicy,
    /// Name of the label column emitted by step grouping.
    pub group_column_name: String,
    /// Appended to the source table name to name summary tables.
    pub summary_suffix: String,
    /// Log dropped columns and name collisions at `warn` instead of `debug`.
    pub warn_on_dropped_columns: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            policy: ResolutionPolicy::default(),
            group_column_name: "Group".to_string(),
            summary_suffix: "summary".to_string(),
            warn_on_dropped_columns: false,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading summarizer config from: {:?}", path);
        let file = std::fs::File::open(path)?;
        let config: Config = serde_json::from_reader(file)?;
        debug!(?config, "Loaded config");
        Ok(config)
    }

    /// Loads `path` when it exists and parses; otherwise falls back to the
    /// defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("Config file not found at {:?}. Using defaults.", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {:?}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        info!("Saving summarizer config to: {:?}", path);
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// The name given to summary tables of `source`.
    pub fn summary_table_name(&self, source: &str) -> String {
        format!("{} {}", source, self.summary_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.policy, ResolutionPolicy::Cartesian);
        assert_eq!(config.group_column_name, "Group");
        assert_eq!(config.summary_table_name("weather"), "weather summary");
        assert!(!config.warn_on_dropped_columns);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = Config::from_json(r#"{ "policy": "positional" }"#).unwrap();
        assert_eq!(config.policy, ResolutionPolicy::Positional);
        assert_eq!(config.summary_suffix, "summary");

        assert!(Config::from_json(r#"{ "policy": "diagonal" }"#).is_err());
    }

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = Config {
            group_column_name: "Step".to_string(),
            warn_on_dropped_columns: true,
            ..Config::default()
        };
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_or_default_tolerates_bad_files() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(Config::load_or_default(&missing), Config::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert_eq!(Config::load_or_default(&broken), Config::default());
    }
}

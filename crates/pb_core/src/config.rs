use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::ExportError;

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Export configuration stored at `~/.publicbodies/config.json`.
///
/// The jurisdiction code is fixed here rather than passed on the command line;
/// every exporter receives it explicitly through this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Jurisdiction whose organizations are exported, matched against
    /// `extras.jurisdiction_code` of each stored document.
    pub jurisdiction_code: String,

    /// Document store location. `None` means `~/.publicbodies/publicbodies.db`.
    pub database_path: Option<PathBuf>,

    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            jurisdiction_code: String::new(),
            database_path: None,
            log_level: "info".into(),
        }
    }
}

impl ExportConfig {
    /// Builds a config for the given jurisdiction with every other field defaulted.
    pub fn for_jurisdiction(code: impl Into<String>) -> Self {
        Self {
            jurisdiction_code: code.into(),
            ..Self::default()
        }
    }

    /// Returns the base config directory: `~/.publicbodies/`
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".publicbodies"))
    }

    /// Returns the config file path: `~/.publicbodies/config.json`
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.json"))
    }

    /// Returns the logs directory: `~/.publicbodies/logs/`
    pub fn logs_dir() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("logs"))
    }

    /// Returns the default database path: `~/.publicbodies/publicbodies.db`
    pub fn default_db_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("publicbodies.db"))
    }

    /// Resolves the database path, honouring `database_path` when set.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_db_path(),
        }
    }

    /// Ensures all required directories exist.
    pub fn ensure_dirs() -> Result<()> {
        let dirs = [Self::base_dir()?, Self::logs_dir()?];
        for dir in &dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
            }
        }
        Ok(())
    }

    /// Loads config from disk, or creates default if missing.
    pub fn load() -> Result<Self> {
        Self::ensure_dirs()?;
        let path = Self::config_path()?;
        Self::load_from_path(&path)
    }

    /// Load config from a specific file path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to_path(path)?;
            info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    /// Save config to a specific file path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Rejects configurations that cannot drive an export.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.jurisdiction_code.trim().is_empty() {
            return Err(ExportError::Config(
                "jurisdiction_code is not set".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = ExportConfig::default();
        assert!(config.jurisdiction_code.is_empty());
        assert!(config.database_path.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn load_missing_file_writes_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.json");

        let config = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(config, ExportConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_reload_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");

        let mut config = ExportConfig::for_jurisdiction("ocd-jurisdiction/country:ca");
        config.database_path = Some(tmp.path().join("store.db"));
        config.save_to_path(&path).unwrap();

        let loaded = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, r#"{"jurisdiction_code": "ocd-jurisdiction/country:ca/province:on"}"#)
            .unwrap();

        let config = ExportConfig::load_from_path(&path).unwrap();
        assert_eq!(
            config.jurisdiction_code,
            "ocd-jurisdiction/country:ca/province:on"
        );
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_json_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(ExportConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn validate_requires_jurisdiction() {
        assert!(ExportConfig::default().validate().is_err());
        assert!(ExportConfig::for_jurisdiction("  ").validate().is_err());
        assert!(ExportConfig::for_jurisdiction("ocd-jurisdiction/country:ca")
            .validate()
            .is_ok());
    }

    #[test]
    fn db_path_prefers_explicit_path() {
        let mut config = ExportConfig::default();
        config.database_path = Some(PathBuf::from("/tmp/custom.db"));
        assert_eq!(config.db_path().unwrap(), PathBuf::from("/tmp/custom.db"));
    }
}

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::analytics::period::Period;

fn default_period() -> Period {
    Period::Week
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Period used by bucketed views when the caller does not pick one.
    #[serde(default = "default_period")]
    pub default_period: Period,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            default_period: default_period(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Overrides the platform data-dir database location when set.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "habitrack")
            .context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Database location: the configured override, or the platform data dir.
    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("habitrack.db")),
        }
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_sections() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.stats.default_period, Period::Week);
        assert!(config.storage.db_path.is_none());
    }

    #[test]
    fn partial_config_round_trips() {
        let config: AppConfig = toml::from_str(
            "[stats]\ndefault_period = \"month\"\n\n[storage]\ndb_path = \"/tmp/habits.db\"\n",
        )
        .unwrap();
        assert_eq!(config.stats.default_period, Period::Month);
        assert_eq!(config.storage.db_path.as_deref(), Some("/tmp/habits.db".as_ref()));

        let rendered = toml::to_string_pretty(&config).unwrap();
        let back: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(back.stats.default_period, Period::Month);
    }
}

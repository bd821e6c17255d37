//! Viewer configuration: column mapping and engine settings

use crate::error::{Result, RosterError};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "rosterdiff.json";

/// Environment variable that may point at a configuration file
pub const CONFIG_ENV_VAR: &str = "ROSTERDIFF_CONFIG";

/// Names of the source columns that feed the typed row fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub name: String,
    pub position: String,
    pub season: String,
    pub overall: String,
    pub potential: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            position: "Pos".to_string(),
            season: "Season".to_string(),
            overall: "Ovr".to_string(),
            potential: "Pot".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub version: String,
    pub columns: ColumnMapping,
    /// Passed straight to DuckDB's `memory_limit` setting
    pub memory_limit: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            version: crate::FORMAT_VERSION.to_string(),
            columns: ColumnMapping::default(),
            memory_limit: "1GB".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Resolve the configuration: explicit path, then the environment
    /// variable, then `./rosterdiff.json`, then built-in defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Self::from_file(Path::new(&path));
            }
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }

        log::debug!("No configuration file found, using defaults");
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path.display()))?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            RosterError::config(format!("Invalid configuration in {}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write this configuration as pretty JSON
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            return Err(RosterError::config(format!(
                "Configuration file already exists: {} (use --force to overwrite)",
                path.display()
            )));
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Wrote configuration to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let columns = [
            ("name", &self.columns.name),
            ("position", &self.columns.position),
            ("season", &self.columns.season),
            ("overall", &self.columns.overall),
            ("potential", &self.columns.potential),
        ];
        for (field, column) in columns {
            if column.trim().is_empty() {
                return Err(RosterError::config(format!("Column for '{}' must not be empty", field)));
            }
        }
        if self.memory_limit.contains('\'') {
            return Err(RosterError::config("memory_limit must not contain quotes"));
        }
        Ok(())
    }
}

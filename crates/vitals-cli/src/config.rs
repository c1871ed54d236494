//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::cli::{ConfigKey, parse_bool_arg, parse_positive};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Database file; the platform data directory when unset
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Default window for `stats`, in calendar days
    #[serde(default = "default_summary_days")]
    pub summary_days: u32,

    /// Default number of records for `recent`
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,

    /// Echo spoken feedback to the terminal
    #[serde(default = "default_true")]
    pub speak: bool,

    /// Where `export` writes files when no directory is given
    #[serde(default)]
    pub export_directory: Option<PathBuf>,
}

fn default_summary_days() -> u32 {
    7
}

fn default_recent_limit() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: None,
            summary_days: default_summary_days(),
            recent_limit: default_recent_limit(),
            speak: true,
            export_directory: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vitals")
            .join("config.toml")
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config: {}", e);
                    }
                },
                Err(e) => {
                    eprintln!("Warning: Failed to read config: {}", e);
                }
            }
        }
        Self::default()
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Current value of `key`, as shown to the user.
    pub fn get(&self, key: ConfigKey) -> String {
        fn path_or_unset(p: &Option<PathBuf>) -> String {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(not set)".to_string())
        }

        match key {
            ConfigKey::Database => path_or_unset(&self.database),
            ConfigKey::SummaryDays => self.summary_days.to_string(),
            ConfigKey::RecentLimit => self.recent_limit.to_string(),
            ConfigKey::Speak => self.speak.to_string(),
            ConfigKey::ExportDirectory => path_or_unset(&self.export_directory),
        }
    }

    /// Parse and store `value` under `key`.
    pub fn set(&mut self, key: ConfigKey, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            ConfigKey::Database => {
                if value.is_empty() {
                    bail!("Database path cannot be empty");
                }
                self.database = Some(PathBuf::from(value));
            }
            ConfigKey::SummaryDays => {
                self.summary_days = parse_positive(value).map_err(anyhow::Error::msg)?;
            }
            ConfigKey::RecentLimit => {
                self.recent_limit = parse_positive(value).map_err(anyhow::Error::msg)?;
            }
            ConfigKey::Speak => {
                self.speak = parse_bool_arg(value).map_err(anyhow::Error::msg)?;
            }
            ConfigKey::ExportDirectory => {
                if value.is_empty() {
                    bail!("Export directory cannot be empty");
                }
                self.export_directory = Some(PathBuf::from(value));
            }
        }
        Ok(())
    }

    /// Reset `key` to its default.
    pub fn unset(&mut self, key: ConfigKey) {
        let defaults = Self::default();
        match key {
            ConfigKey::Database => self.database = defaults.database,
            ConfigKey::SummaryDays => self.summary_days = defaults.summary_days,
            ConfigKey::RecentLimit => self.recent_limit = defaults.recent_limit,
            ConfigKey::Speak => self.speak = defaults.speak,
            ConfigKey::ExportDirectory => self.export_directory = defaults.export_directory,
        }
    }
}

/// Resolve the database path: flag or `VITALS_DB`, then config, then the
/// platform default.
pub fn resolve_database(arg: Option<PathBuf>, config: &Config) -> PathBuf {
    arg.or_else(|| config.database.clone())
        .unwrap_or_else(vitals_store::default_db_path)
}

/// Resolve a numeric option: explicit value wins over config.
pub fn resolve_or(arg: Option<u32>, configured: u32) -> u32 {
    arg.unwrap_or(configured)
}

//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use flashpaper_cipher::{SnippetCipher, KEY_ENV};
use flashpaper_domain::{LanguageAllowList, DEFAULT_LANGUAGES};
use flashpaper_janitor::JanitorConfig;
use flashpaper_store::StoreOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the database path
pub const DATABASE_ENV: &str = "FLASHPAPER_DATABASE";

/// Environment variable overriding the sweep interval, in seconds
pub const JANITOR_INTERVAL_ENV: &str = "JANITOR_INTERVAL";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Encryption key: 64 hex characters or 32 raw bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,

    /// Language tags accepted at creation
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Janitor settings
    #[serde(default)]
    pub janitor: JanitorConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the default config file and database.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".flashpaper"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration, then apply environment overrides.
    ///
    /// An explicit path must exist; the default path falls back to defaults
    /// when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&contents)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }

        if let Some(key) = lookup(KEY_ENV).filter(|v| !v.is_empty()) {
            self.encryption_key = Some(key);
        }

        if let Some(raw) = lookup(JANITOR_INTERVAL_ENV) {
            self.janitor.sweep_interval_secs = raw.trim().parse().map_err(|_| {
                CliError::Config(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    JANITOR_INTERVAL_ENV, raw
                ))
            })?;
        }

        Ok(())
    }

    /// Reject settings nothing can run with.
    pub fn validate(&self) -> Result<()> {
        self.janitor.validate()?;
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::Config("database_path must not be empty".into()));
        }
        Ok(())
    }

    /// Build the cipher from the configured key.
    pub fn cipher(&self) -> Result<SnippetCipher> {
        let key = self.encryption_key.as_deref().ok_or_else(|| {
            CliError::Config(format!(
                "encryption key is not configured; set {} or encryption_key",
                KEY_ENV
            ))
        })?;
        Ok(SnippetCipher::from_key_material(key)?)
    }

    /// Store options derived from this configuration.
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            languages: LanguageAllowList::new(&self.languages),
            ..StoreOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            encryption_key: None,
            languages: default_languages(),
            janitor: JanitorConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_database_path() -> PathBuf {
    Config::dir()
        .map(|dir| dir.join("flashpaper.db"))
        .unwrap_or_else(|_| PathBuf::from("flashpaper.db"))
}

fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

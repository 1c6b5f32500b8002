//! Configuration management for LeadScout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Main application configuration.
///
/// This is loaded from `~/.config/leadscout/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Browser automation settings
    pub browser: BrowserConfig,
    /// Lazy-load scrolling settings
    pub scroll: ScrollConfig,
    /// Website enrichment settings
    pub enrichment: EnrichmentConfig,
    /// Database settings
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LEADSCOUT_HEADLESS`: Override browser headless mode (true/false)
    /// - `LEADSCOUT_CONCURRENCY`: Override enrichment concurrency
    /// - `LEADSCOUT_DATABASE_PATH`: Override database file path
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("LEADSCOUT_HEADLESS") {
            if let Ok(headless) = val.parse() {
                config.browser.headless = headless;
                tracing::debug!("Override browser.headless from env: {}", headless);
            }
        }

        if let Ok(val) = std::env::var("LEADSCOUT_CONCURRENCY") {
            if let Ok(concurrency) = val.parse() {
                config.enrichment.concurrency = concurrency;
                tracing::debug!("Override enrichment.concurrency from env: {}", concurrency);
            }
        }

        if let Ok(val) = std::env::var("LEADSCOUT_DATABASE_PATH") {
            config.database.path = val.clone();
            tracing::debug!("Override database.path from env: {}", val);
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/leadscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "leadscout", "leadscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/leadscout`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "leadscout", "leadscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// Browser automation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    pub headless: bool,
    /// Navigation timeout in seconds
    pub navigation_timeout_secs: u64,
}

impl BrowserConfig {
    /// Navigation timeout as a `Duration`.
    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            navigation_timeout_secs: 60,
        }
    }
}

/// Lazy-load scrolling settings.
///
/// The scroll loop is deliberately time-based rather than
/// condition-based: a fixed number of fixed-distance steps with a fixed
/// pause between them. The three constants are configuration so a
/// smarter strategy can replace them without touching callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Number of scroll steps to perform
    pub steps: u32,
    /// Distance of each scroll step in pixels
    pub distance_px: u32,
    /// Pause between scroll steps in milliseconds
    pub delay_ms: u64,
    /// CSS selector of the scrollable results container
    pub feed_selector: String,
}

impl ScrollConfig {
    /// Inter-step delay as a `Duration`.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            steps: 20,
            distance_px: 1000,
            delay_ms: 2000,
            feed_selector: r#"div[role="feed"]"#.to_string(),
        }
    }
}

/// Website enrichment settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Number of concurrent enrichment fetches per batch
    pub concurrency: usize,
    /// Pause between batches in milliseconds
    pub inter_batch_delay_ms: u64,
    /// Per-fetch timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl EnrichmentConfig {
    /// Inter-batch delay as a `Duration`.
    #[must_use]
    pub fn inter_batch_delay(&self) -> Duration {
        Duration::from_millis(self.inter_batch_delay_ms)
    }

    /// Per-fetch timeout as a `Duration`.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            concurrency: 3,
            inter_batch_delay_ms: 3000,
            fetch_timeout_secs: 30,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "leadscout.db".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.browser.headless);
        assert_eq!(config.browser.navigation_timeout_secs, 60);
        assert_eq!(config.scroll.steps, 20);
        assert_eq!(config.scroll.distance_px, 1000);
        assert_eq!(config.scroll.delay_ms, 2000);
        assert_eq!(config.enrichment.concurrency, 3);
        assert_eq!(config.enrichment.inter_batch_delay_ms, 3000);
        assert_eq!(config.database.path, "leadscout.db");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[browser]"));
        assert!(toml_str.contains("[scroll]"));
        assert!(toml_str.contains("[enrichment]"));
        assert!(toml_str.contains("[database]"));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.scroll.steps, config.scroll.steps);
        assert_eq!(parsed.enrichment.concurrency, config.enrichment.concurrency);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let toml_str = r#"
            [enrichment]
            concurrency = 5
        "#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.enrichment.concurrency, 5);
        // Unspecified sections and fields fall back to defaults.
        assert_eq!(config.enrichment.inter_batch_delay_ms, 3000);
        assert_eq!(config.scroll.steps, 20);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_duration_helpers() {
        let config = AppConfig::default();
        assert_eq!(config.scroll.delay(), Duration::from_secs(2));
        assert_eq!(
            config.enrichment.inter_batch_delay(),
            Duration::from_secs(3)
        );
        assert_eq!(
            config.browser.navigation_timeout(),
            Duration::from_secs(60)
        );
    }
}

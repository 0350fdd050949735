//! Configuration management.
//!
//! Configuration is read from `~/.config/gazette/config.toml` at
//! startup. If the file doesn't exist, a default configuration with
//! comments is created. Missing fields use default values.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    /// Country → query term used for the one-shot fallback against
    /// the full-text search endpoint when top-headlines is empty for
    /// that country.
    pub fallback_queries: BTreeMap<String, String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://newsapi.org/v2".to_string(),
            page_size: 20,
            timeout_secs: 10,
            fallback_queries: default_fallback_queries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub page_size: usize,
    pub default_category: String,
    pub default_country: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: 6,
            default_category: "general".to_string(),
            default_country: "us".to_string(),
        }
    }
}

fn default_fallback_queries() -> BTreeMap<String, String> {
    [
        ("in", "India"),
        ("gb", "United Kingdom"),
        ("de", "Germany"),
        ("fr", "France"),
        ("au", "Australia"),
        ("ca", "Canada"),
        ("jp", "Japan"),
        ("br", "Brazil"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments. If the file exists but is invalid, returns an error.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/gazette/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("gazette").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gazette configuration

[provider]
# API key for the headline provider (newsapi.org or compatible)
api_key = ""

# Base URL of the headline API
base_url = "https://newsapi.org/v2"

# Articles requested per call; any value >= the UI page size works
page_size = 20

# Request timeout in seconds
timeout_secs = 10

# Query term for the one-shot fallback against the full-text search
# endpoint when top-headlines returns nothing for a country
[provider.fallback_queries]
in = "India"
gb = "United Kingdom"
de = "Germany"
fr = "France"
au = "Australia"
ca = "Canada"
jp = "Japan"
br = "Brazil"

[feed]
# Articles per page in the UI
page_size = 6

# Mode on startup
default_category = "general"
default_country = "us"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.provider.base_url, "https://newsapi.org/v2");
        assert_eq!(config.provider.page_size, 20);
        assert_eq!(config.feed.page_size, 6);
        assert_eq!(config.feed.default_country, "us");
        assert_eq!(
            config.provider.fallback_queries.get("in").map(String::as_str),
            Some("India")
        );
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[feed]
page_size = 10
"##;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.feed.page_size, 10);
        // Defaults for everything else
        assert_eq!(config.feed.default_category, "general");
        assert_eq!(config.provider.timeout_secs, 10);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");

        assert_eq!(config.provider.base_url, "https://newsapi.org/v2");
        assert_eq!(config.feed.default_category, "general");
        assert!(config.provider.fallback_queries.contains_key("de"));
    }
}

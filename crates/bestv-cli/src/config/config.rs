//! `AppConfig` struct and TOML loading.

use std::path::Path;

use anyhow::{Context, Result};
use bestv_search::image::DEFAULT_IMAGE_BASE_URL;
use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB request settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
}

/// TMDB request configuration.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TmdbConfig {
    /// Response language (e.g. "en-US", "ja-JP").
    pub language: String,
    /// Include adult content in searches and discovery.
    pub include_adult: bool,
    /// Base URL that backdrop paths are appended to.
    pub image_base_url: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            language: String::from("en-US"),
            include_adult: false,
            image_base_url: String::from(DEFAULT_IMAGE_BASE_URL),
        }
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

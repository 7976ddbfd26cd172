//! Listing configuration and presets
//!
//! Provides ready-to-use configurations that framework users can use
//! directly or as starting points for customization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for listing configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid control panel root: {0:?}")]
    InvalidCpRoot(String),

    #[error("Invalid base URL (expected http:// or https://): {0}")]
    InvalidBaseUrl(String),

    #[error("Failed to parse listing configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// When per-site editor URLs carry a `?site=` qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteQualifier {
    /// Qualify every site except the default one
    #[default]
    NonDefault,
    /// Qualify every site, default included, once more than one site exists
    WhenMultisite,
}

/// Listing configuration
///
/// Deserialized configurations are validated; values built with a struct
/// literal are checked when a [`crate::CpUrlBuilder`] is created from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawListingConfig")]
pub struct ListingConfig {
    /// Control panel route prefix (e.g., "cp")
    pub cp_root: String,
    /// Absolute URL prefix for edit URLs; relative URLs when unset
    pub base_url: Option<String>,
    /// Site qualifier policy for per-site editor URLs
    pub site_qualifier: SiteQualifier,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            cp_root: "cp".to_string(),
            base_url: None,
            site_qualifier: SiteQualifier::default(),
        }
    }
}

impl ListingConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = self.cp_root.trim_matches('/');
        if root.is_empty() || root.contains(|c: char| c.is_whitespace() || c == '?' || c == '#') {
            return Err(ConfigError::InvalidCpRoot(self.cp_root.clone()));
        }

        if let Some(base) = &self.base_url {
            let host = base
                .strip_prefix("http://")
                .or_else(|| base.strip_prefix("https://"));
            match host {
                Some(host) if !host.is_empty() && !host.starts_with('/') => {}
                _ => return Err(ConfigError::InvalidBaseUrl(base.clone())),
            }
        }
        Ok(())
    }
}

/// Unvalidated configuration as read from a document
#[derive(Deserialize)]
#[serde(default)]
struct RawListingConfig {
    cp_root: String,
    base_url: Option<String>,
    site_qualifier: SiteQualifier,
}

impl Default for RawListingConfig {
    fn default() -> Self {
        let ListingConfig {
            cp_root,
            base_url,
            site_qualifier,
        } = ListingConfig::default();
        Self {
            cp_root,
            base_url,
            site_qualifier,
        }
    }
}

impl TryFrom<RawListingConfig> for ListingConfig {
    type Error = ConfigError;

    fn try_from(raw: RawListingConfig) -> Result<Self, Self::Error> {
        let config = Self {
            cp_root: raw.cp_root,
            base_url: raw.base_url,
            site_qualifier: raw.site_qualifier,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for listing configurations
#[derive(Debug, Default)]
pub struct ListingConfigBuilder {
    config: ListingConfig,
}

impl ListingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the control panel route prefix
    pub fn cp_root(mut self, root: impl Into<String>) -> Self {
        self.config.cp_root = root.into();
        self
    }

    /// Render absolute URLs under `base_url`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = Some(base_url.into());
        self
    }

    pub fn site_qualifier(mut self, qualifier: SiteQualifier) -> Self {
        self.config.site_qualifier = qualifier;
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<ListingConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Pre-configured listing setups
pub struct ListingPresets;

impl ListingPresets {
    /// Relative URLs under `/cp`
    pub fn relative() -> ListingConfig {
        ListingConfig::default()
    }

    /// Absolute URLs under `base_url`
    pub fn absolute(base_url: impl Into<String>) -> Result<ListingConfig, ConfigError> {
        ListingConfigBuilder::new().base_url(base_url).build()
    }

    /// Absolute URLs under `http://localhost`
    pub fn testing() -> ListingConfig {
        ListingConfig {
            base_url: Some("http://localhost".to_string()),
            ..ListingConfig::default()
        }
    }
}

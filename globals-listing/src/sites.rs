//! Site registry and per-request site selection
//!
//! The registry holds the configured sites in order; the first one is the
//! default site. The selected site is plain state of a registry value, and
//! [`SiteRegistry::selection`] takes the snapshot a listing is evaluated
//! against.

use globals_api::{Site, SiteHandle};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Error type for site registry operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SiteError {
    #[error("At least one site must be configured")]
    Empty,

    #[error("Site configured more than once: {0}")]
    Duplicate(String),

    #[error("Unknown site: {0}")]
    Unknown(String),
}

/// Ordered set of configured sites with one selected site
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "SitesConfig")]
pub struct SiteRegistry {
    sites: Vec<Site>,
    selected: usize,
}

impl SiteRegistry {
    /// Create a registry; the first site is the default and starts selected
    pub fn new(sites: Vec<Site>) -> Result<Self, SiteError> {
        if sites.is_empty() {
            return Err(SiteError::Empty);
        }

        let mut seen = HashSet::new();
        for site in &sites {
            if !seen.insert(site.handle.as_str()) {
                return Err(SiteError::Duplicate(site.handle.to_string()));
            }
        }

        Ok(Self { sites, selected: 0 })
    }

    /// Registry with a single site
    pub fn single(handle: impl Into<SiteHandle>) -> Self {
        Self {
            sites: vec![Site::new(handle)],
            selected: 0,
        }
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn get(&self, handle: &str) -> Option<&Site> {
        self.sites.iter().find(|site| site.handle.as_str() == handle)
    }

    /// The first configured site
    pub fn default_site(&self) -> &Site {
        &self.sites[0]
    }

    pub fn selected(&self) -> &Site {
        &self.sites[self.selected]
    }

    pub fn is_multisite(&self) -> bool {
        self.sites.len() > 1
    }

    /// Change the selected site
    pub fn select(&mut self, handle: &str) -> Result<(), SiteError> {
        let index = self
            .sites
            .iter()
            .position(|site| site.handle.as_str() == handle)
            .ok_or_else(|| SiteError::Unknown(handle.to_string()))?;

        debug!(site = handle, "Selected site");
        self.selected = index;
        Ok(())
    }

    /// Builder-style variant of [`SiteRegistry::select`]
    pub fn with_selected(mut self, handle: &str) -> Result<Self, SiteError> {
        self.select(handle)?;
        Ok(self)
    }

    /// Snapshot of the site context for one listing
    pub fn selection(&self) -> SiteSelection {
        SiteSelection {
            selected: self.selected().handle.clone(),
            default: self.default_site().handle.clone(),
            multisite: self.is_multisite(),
        }
    }
}

impl TryFrom<Vec<Site>> for SiteRegistry {
    type Error = SiteError;

    fn try_from(sites: Vec<Site>) -> Result<Self, Self::Error> {
        Self::new(sites)
    }
}

// ============================================================================
// Site Configuration
// ============================================================================

/// Accepted shapes of a site configuration
///
/// Either a list of sites with inline handles, or a map of
/// `handle -> {name, locale, url}` whose first entry is the default site.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SitesConfig {
    List(Vec<Site>),
    Map(SiteMap),
}

impl TryFrom<SitesConfig> for SiteRegistry {
    type Error = SiteError;

    fn try_from(config: SitesConfig) -> Result<Self, Self::Error> {
        match config {
            SitesConfig::List(sites) => Self::new(sites),
            SitesConfig::Map(SiteMap(sites)) => Self::new(sites),
        }
    }
}

/// Site entry of the map shape; the handle is the map key
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SiteConfig {
    name: Option<String>,
    locale: Option<String>,
    url: Option<String>,
}

/// Map-shaped site configuration in document order
#[derive(Debug)]
struct SiteMap(Vec<Site>);

impl<'de> Deserialize<'de> for SiteMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SiteMapVisitor;

        impl<'de> Visitor<'de> for SiteMapVisitor {
            type Value = SiteMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of site handles to site configurations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SiteMap, A::Error> {
                let mut sites = Vec::new();
                while let Some((handle, config)) = map.next_entry::<SiteHandle, SiteConfig>()? {
                    sites.push(Site {
                        handle,
                        name: config.name,
                        locale: config.locale,
                        url: config.url,
                    });
                }
                Ok(SiteMap(sites))
            }
        }

        deserializer.deserialize_map(SiteMapVisitor)
    }
}

/// Site context a listing is evaluated against
///
/// Taken once per listing so every row reflects the same site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSelection {
    selected: SiteHandle,
    default: SiteHandle,
    multisite: bool,
}

impl SiteSelection {
    /// Build a selection without a registry
    ///
    /// The selected site need not be configured anywhere; unknown sites
    /// simply have no localizations.
    pub fn new(
        selected: impl Into<SiteHandle>,
        default: impl Into<SiteHandle>,
        multisite: bool,
    ) -> Self {
        Self {
            selected: selected.into(),
            default: default.into(),
            multisite,
        }
    }

    pub fn selected(&self) -> &SiteHandle {
        &self.selected
    }

    pub fn default_site(&self) -> &SiteHandle {
        &self.default
    }

    pub fn is_multisite(&self) -> bool {
        self.multisite
    }

    pub fn is_default_selected(&self) -> bool {
        self.selected == self.default
    }
}

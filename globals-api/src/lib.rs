//! globals-api: Shared types for the globals listing
//!
//! This crate defines the data exchanged between the listing core and its
//! collaborators: global sets with their per-site localizations, configured
//! sites, and the rows handed to the view layer.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

macro_rules! handle_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a handle from any string-like value
            pub fn new(handle: impl Into<String>) -> Self {
                Self(handle.into())
            }

            /// Borrow the handle text
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

handle_type!(
    /// Unique handle of a global set (e.g. "footer", "seo")
    GlobalHandle
);

handle_type!(
    /// Handle of a configured site (e.g. "en", "fr")
    SiteHandle
);

/// Error type for global set invariants
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GlobalSetError {
    #[error("Global set '{0}' has no localizations")]
    NoLocalizations(String),

    #[error("Cannot remove origin localization '{site}' of global set '{handle}'")]
    OriginLocalization { handle: String, site: String },

    #[error("Global set '{handle}' is not localized for site '{site}'")]
    NotLocalized { handle: String, site: String },
}

/// Per-site variant of a global set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    handle: GlobalHandle,
    site: SiteHandle,
}

impl Localization {
    /// Handle of the owning global set
    pub fn handle(&self) -> &GlobalHandle {
        &self.handle
    }

    /// Site this localization belongs to
    pub fn site(&self) -> &SiteHandle {
        &self.site
    }
}

/// A named, site-localizable configuration resource
///
/// Always holds the localization of its origin site, so a global set is
/// never without content somewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GlobalSetRecord", into = "GlobalSetRecord")]
pub struct GlobalSet {
    handle: GlobalHandle,
    origin: SiteHandle,
    localizations: BTreeMap<SiteHandle, Localization>,
}

impl GlobalSet {
    /// Create a global set localized to its origin site
    pub fn new(handle: impl Into<GlobalHandle>, origin: impl Into<SiteHandle>) -> Self {
        let mut set = Self {
            handle: handle.into(),
            origin: origin.into(),
            localizations: BTreeMap::new(),
        };
        let origin = set.origin.clone();
        set.add_localization(origin);
        set
    }

    /// Unique handle of this set
    pub fn handle(&self) -> &GlobalHandle {
        &self.handle
    }

    /// Site the set was created in
    pub fn origin(&self) -> &SiteHandle {
        &self.origin
    }

    /// Build a localization for `site` without attaching it
    pub fn make_localization(&self, site: impl Into<SiteHandle>) -> Localization {
        Localization {
            handle: self.handle.clone(),
            site: site.into(),
        }
    }

    /// Attach a localization for `site` (no-op if one already exists)
    pub fn add_localization(&mut self, site: impl Into<SiteHandle>) -> &mut Self {
        let localization = self.make_localization(site);
        self.localizations
            .entry(localization.site.clone())
            .or_insert(localization);
        self
    }

    /// Builder-style variant of [`GlobalSet::add_localization`]
    pub fn with_localization(mut self, site: impl Into<SiteHandle>) -> Self {
        self.add_localization(site);
        self
    }

    /// Remove the localization for `site`
    ///
    /// The origin localization cannot be removed.
    pub fn remove_localization(&mut self, site: &str) -> Result<Localization, GlobalSetError> {
        if self.origin.as_str() == site {
            return Err(GlobalSetError::OriginLocalization {
                handle: self.handle.to_string(),
                site: site.to_string(),
            });
        }
        self.localizations
            .remove(site)
            .ok_or_else(|| GlobalSetError::NotLocalized {
                handle: self.handle.to_string(),
                site: site.to_string(),
            })
    }

    /// Get the localization for `site`, if any
    pub fn in_site(&self, site: &str) -> Option<&Localization> {
        self.localizations.get(site)
    }

    /// Whether a localization exists for `site`
    pub fn has_localization(&self, site: &str) -> bool {
        self.localizations.contains_key(site)
    }

    /// All localizations, ordered by site handle
    pub fn localizations(&self) -> impl Iterator<Item = &Localization> {
        self.localizations.values()
    }
}

/// Serialized form of a global set
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GlobalSetRecord {
    handle: GlobalHandle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin: Option<SiteHandle>,
    sites: Vec<SiteHandle>,
}

impl TryFrom<GlobalSetRecord> for GlobalSet {
    type Error = GlobalSetError;

    fn try_from(record: GlobalSetRecord) -> Result<Self, Self::Error> {
        let origin = match record.origin {
            Some(origin) => origin,
            None => record
                .sites
                .first()
                .cloned()
                .ok_or_else(|| GlobalSetError::NoLocalizations(record.handle.to_string()))?,
        };

        let mut set = GlobalSet::new(record.handle, origin);
        for site in record.sites {
            set.add_localization(site);
        }
        Ok(set)
    }
}

impl From<GlobalSet> for GlobalSetRecord {
    fn from(set: GlobalSet) -> Self {
        Self {
            handle: set.handle,
            origin: Some(set.origin),
            sites: set.localizations.into_keys().collect(),
        }
    }
}

/// A configured site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Site handle
    pub handle: SiteHandle,

    /// Display name (e.g., "French")
    #[serde(default)]
    pub name: Option<String>,

    /// Locale code (e.g., "fr")
    #[serde(default)]
    pub locale: Option<String>,

    /// Front-end URL of the site
    #[serde(default)]
    pub url: Option<String>,
}

impl Site {
    /// Create a site with no display metadata
    pub fn new(handle: impl Into<SiteHandle>) -> Self {
        Self {
            handle: handle.into(),
            name: None,
            locale: None,
            url: None,
        }
    }

    /// Set the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Set the site URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Display name, falling back to the handle
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.handle.as_str())
    }
}

/// One entry of the globals listing as consumed by the view layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRow {
    /// Global set handle
    pub handle: GlobalHandle,

    /// Where the entry links to
    pub edit_url: String,
}

impl ViewRow {
    pub fn new(handle: GlobalHandle, edit_url: impl Into<String>) -> Self {
        Self {
            handle,
            edit_url: edit_url.into(),
        }
    }
}

/// Ordered collection of view rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRows(Vec<ViewRow>);

impl ViewRows {
    pub fn new(rows: Vec<ViewRow>) -> Self {
        Self(rows)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ViewRow> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViewRow> {
        self.0.iter()
    }

    /// Find the row for a handle
    pub fn find(&self, handle: &str) -> Option<&ViewRow> {
        self.0.iter().find(|row| row.handle.as_str() == handle)
    }

    /// Re-sort rows by handle for display
    pub fn sorted_by_handle(mut self) -> Self {
        self.0.sort_by(|a, b| a.handle.cmp(&b.handle));
        self
    }

    pub fn into_inner(self) -> Vec<ViewRow> {
        self.0
    }
}

impl FromIterator<ViewRow> for ViewRows {
    fn from_iter<I: IntoIterator<Item = ViewRow>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for ViewRows {
    type Item = ViewRow;
    type IntoIter = std::vec::IntoIter<ViewRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ViewRows {
    type Item = &'a ViewRow;
    type IntoIter = std::slice::Iter<'a, ViewRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

//! Edit-target resolution for visible global sets
//!
//! A set localized for the selected site links to its per-site editor.
//! Otherwise (only reachable with `configure globals`) it links to the
//! configuration view, where the localization can be set up.

use globals_api::{GlobalHandle, GlobalSet, SiteHandle};
use std::sync::Arc;
use urlencoding::encode;

use crate::config::{ConfigError, ListingConfig, SiteQualifier};
use crate::sites::SiteSelection;

/// Builds control panel URLs for global sets
pub trait UrlBuilder: Send + Sync {
    /// Per-site content editor, optionally qualified with a site
    fn per_site_edit_url(&self, handle: &GlobalHandle, site: Option<&SiteHandle>) -> String;

    /// Configuration view of a global set
    fn configure_url(&self, handle: &GlobalHandle) -> String;
}

/// Default URL builder: `{base_url}/{cp_root}/globals/{handle}`
///
/// Global and site handles are percent-encoded, so handles outside the
/// usual slug alphabet still yield a single path segment or query value.
#[derive(Debug, Clone)]
pub struct CpUrlBuilder {
    prefix: String,
}

impl CpUrlBuilder {
    /// Builder for a validated `config`
    pub fn new(config: &ListingConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let base = config
            .base_url
            .as_deref()
            .map(|base| base.trim_end_matches('/'))
            .unwrap_or("");
        Ok(Self {
            prefix: format!("{}/{}/globals", base, config.cp_root.trim_matches('/')),
        })
    }
}

impl Default for CpUrlBuilder {
    /// Relative URLs under `/cp`
    fn default() -> Self {
        Self {
            prefix: "/cp/globals".to_string(),
        }
    }
}

impl UrlBuilder for CpUrlBuilder {
    fn per_site_edit_url(&self, handle: &GlobalHandle, site: Option<&SiteHandle>) -> String {
        let handle = encode(handle.as_str());
        match site {
            Some(site) => format!("{}/{}?site={}", self.prefix, handle, encode(site.as_str())),
            None => format!("{}/{}", self.prefix, handle),
        }
    }

    fn configure_url(&self, handle: &GlobalHandle) -> String {
        format!("{}/{}/edit", self.prefix, encode(handle.as_str()))
    }
}

/// Where a listing entry points to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget<'a> {
    /// Per-site editor for the selected site
    Localized {
        site: &'a SiteHandle,
        /// Whether the URL names the site explicitly
        qualified: bool,
    },
    /// Configuration view
    Configure,
}

/// Resolves edit targets and renders them as URLs
#[derive(Clone)]
pub struct EditTargetResolver {
    urls: Arc<dyn UrlBuilder>,
    qualifier: SiteQualifier,
}

impl EditTargetResolver {
    pub fn new(urls: impl UrlBuilder + 'static, qualifier: SiteQualifier) -> Self {
        Self {
            urls: Arc::new(urls),
            qualifier,
        }
    }

    /// Resolver using [`CpUrlBuilder`] for `config`
    pub fn from_config(config: &ListingConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(CpUrlBuilder::new(config)?, config.site_qualifier))
    }

    /// Decide the target for a visible global set
    ///
    /// Localization existence wins over permission scope.
    pub fn target<'a>(&self, global: &GlobalSet, sites: &'a SiteSelection) -> EditTarget<'a> {
        let selected = sites.selected();
        if !global.has_localization(selected.as_str()) {
            return EditTarget::Configure;
        }

        let qualified = match self.qualifier {
            SiteQualifier::NonDefault => !sites.is_default_selected(),
            SiteQualifier::WhenMultisite => sites.is_multisite(),
        };
        EditTarget::Localized {
            site: selected,
            qualified,
        }
    }

    /// Edit URL for a visible global set
    pub fn resolve_edit_url(&self, global: &GlobalSet, sites: &SiteSelection) -> String {
        match self.target(global, sites) {
            EditTarget::Localized { site, qualified } => self
                .urls
                .per_site_edit_url(global.handle(), qualified.then_some(site)),
            EditTarget::Configure => self.urls.configure_url(global.handle()),
        }
    }
}

impl Default for EditTargetResolver {
    fn default() -> Self {
        Self::new(CpUrlBuilder::default(), SiteQualifier::default())
    }
}

impl std::fmt::Debug for EditTargetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditTargetResolver")
            .field("qualifier", &self.qualifier)
            .finish_non_exhaustive()
    }
}

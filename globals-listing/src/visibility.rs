//! Visibility filter
//!
//! Decides whether a global set appears in the listing for the acting user
//! and the selected site.

use globals_api::GlobalSet;

use crate::permission::PermissionOracle;
use crate::sites::SiteSelection;

/// Why a global set was left out of the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HiddenReason {
    /// Neither `configure globals` nor `edit <handle> globals`
    NoEditPermission,
    /// No localization for the selected site
    NotLocalized,
    /// No `access <site> site` for the selected site
    NoSiteAccess,
}

/// Outcome of the visibility check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden(HiddenReason),
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Evaluate visibility of `global` for the selected site
///
/// `configure globals` waives both the localization and the site access
/// requirement. Everyone else needs `edit <handle> globals`, a localization
/// for the selected site and `access <site> site`. Site access is only
/// enforced on multisite installations.
pub fn evaluate(
    global: &GlobalSet,
    oracle: &dyn PermissionOracle,
    sites: &SiteSelection,
) -> Visibility {
    if oracle.can_configure_globals() {
        return Visibility::Visible;
    }

    let selected = sites.selected();
    if !oracle.can_edit_global(global.handle()) {
        Visibility::Hidden(HiddenReason::NoEditPermission)
    } else if !global.has_localization(selected.as_str()) {
        Visibility::Hidden(HiddenReason::NotLocalized)
    } else if sites.is_multisite() && !oracle.can_access_site(selected) {
        Visibility::Hidden(HiddenReason::NoSiteAccess)
    } else {
        Visibility::Visible
    }
}

/// Whether `global` appears in the listing
pub fn is_visible(
    global: &GlobalSet,
    oracle: &dyn PermissionOracle,
    sites: &SiteSelection,
) -> bool {
    evaluate(global, oracle, sites).is_visible()
}

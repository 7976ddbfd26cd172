//! Listing projector
//!
//! Runs the visibility filter and the edit-target resolver over a global
//! set collection in input order, producing the rows of the listing.
//!
//! ```rust
//! use globals_api::GlobalSet;
//! use globals_listing::edit_target::EditTargetResolver;
//! use globals_listing::permission::PermissionSet;
//! use globals_listing::projector::Listing;
//! use globals_listing::sites::SiteRegistry;
//!
//! let globals = vec![GlobalSet::new("footer", "default"), GlobalSet::new("seo", "default")];
//! let user = PermissionSet::from_tokens(["access cp", "edit seo globals"]);
//! let sites = SiteRegistry::single("default");
//! let resolver = EditTargetResolver::default();
//!
//! let listing = Listing::new(&globals, &user, sites.selection(), &resolver);
//! let rows = listing.collect();
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows.get(0).unwrap().edit_url, "/cp/globals/seo");
//! ```

use globals_api::{GlobalSet, ViewRow, ViewRows};
use tracing::{debug, trace};

use crate::edit_target::EditTargetResolver;
use crate::permission::PermissionOracle;
use crate::sites::SiteSelection;
use crate::visibility::{self, Visibility};

/// Lazily project `globals` into view rows
///
/// Hidden sets are dropped; the remaining rows keep input order.
pub fn project<'a, I>(
    globals: I,
    oracle: &'a dyn PermissionOracle,
    sites: &'a SiteSelection,
    resolver: &'a EditTargetResolver,
) -> impl Iterator<Item = ViewRow> + 'a
where
    I: IntoIterator<Item = &'a GlobalSet>,
    I::IntoIter: 'a,
{
    globals.into_iter().filter_map(move |global| {
        match visibility::evaluate(global, oracle, sites) {
            Visibility::Visible => Some(ViewRow::new(
                global.handle().clone(),
                resolver.resolve_edit_url(global, sites),
            )),
            Visibility::Hidden(reason) => {
                trace!(
                    handle = %global.handle(),
                    site = %sites.selected(),
                    ?reason,
                    "Global set hidden from listing"
                );
                None
            }
        }
    })
}

/// A listing of global sets for one user and one site selection
///
/// Holds only borrowed inputs plus the site snapshot, so rows can be
/// produced any number of times with identical results.
pub struct Listing<'a> {
    globals: &'a [GlobalSet],
    oracle: &'a dyn PermissionOracle,
    sites: SiteSelection,
    resolver: &'a EditTargetResolver,
}

impl<'a> Listing<'a> {
    pub fn new(
        globals: &'a [GlobalSet],
        oracle: &'a dyn PermissionOracle,
        sites: SiteSelection,
        resolver: &'a EditTargetResolver,
    ) -> Self {
        Self {
            globals,
            oracle,
            sites,
            resolver,
        }
    }

    /// Site context the listing is evaluated against
    pub fn sites(&self) -> &SiteSelection {
        &self.sites
    }

    /// Iterate the visible rows
    pub fn rows(&self) -> impl Iterator<Item = ViewRow> + '_ {
        project(self.globals, self.oracle, &self.sites, self.resolver)
    }

    /// Collect the visible rows
    pub fn collect(&self) -> ViewRows {
        let rows: ViewRows = self.rows().collect();
        debug!(
            site = %self.sites.selected(),
            total = self.globals.len(),
            visible = rows.len(),
            "Projected globals listing"
        );
        rows
    }
}

impl std::fmt::Debug for Listing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listing")
            .field("globals", &self.globals.len())
            .field("sites", &self.sites)
            .finish_non_exhaustive()
    }
}

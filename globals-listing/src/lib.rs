//! globals-listing: Authorization-aware listing of global sets
//!
//! Given the global sets of a site installation, the acting user's resolved
//! permissions and the selected site, this crate produces the rows of the
//! control panel's globals listing: which sets the user may see, and where
//! each entry links to.
//!
//! # Architecture
//!
//! ```text
//! GlobalsIndex
//!   ├─ GlobalSetRepository ──► Vec<GlobalSet>
//!   ├─ SiteRegistry ─────────► SiteSelection (read once)
//!   └─ Listing (projector)
//!        ├─ visibility::evaluate(set, PermissionOracle, selected site)
//!        └─ EditTargetResolver ──► UrlBuilder ──► ViewRow { handle, edit_url }
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use globals_api::{GlobalSet, Site};
//! use globals_listing::{GlobalsIndex, ListingPresets, MemoryGlobalSetRepository};
//! use globals_listing::{PermissionSet, SiteRegistry};
//!
//! let repository = MemoryGlobalSetRepository::new();
//! repository.insert(GlobalSet::new("footer", "en").with_localization("fr")).unwrap();
//! repository.insert(GlobalSet::new("seo", "en")).unwrap();
//!
//! let sites = SiteRegistry::new(vec![Site::new("en"), Site::new("fr")])
//!     .unwrap()
//!     .with_selected("fr")
//!     .unwrap();
//! let user = PermissionSet::from_tokens(["access cp", "configure globals"]);
//!
//! let index = GlobalsIndex::new(repository, &ListingPresets::relative()).unwrap();
//! let rows = index.list(&user, &sites).unwrap();
//!
//! assert_eq!(rows.get(0).unwrap().edit_url, "/cp/globals/footer?site=fr");
//! assert_eq!(rows.get(1).unwrap().edit_url, "/cp/globals/seo/edit");
//! ```

pub mod config;
pub mod edit_target;
pub mod index;
pub mod permission;
pub mod projector;
pub mod repository;
pub mod sites;
#[cfg(feature = "tracing")]
pub mod tracing_support;
pub mod visibility;

pub use config::{ConfigError, ListingConfig, ListingConfigBuilder, ListingPresets, SiteQualifier};
pub use edit_target::{CpUrlBuilder, EditTarget, EditTargetResolver, UrlBuilder};
pub use index::GlobalsIndex;
pub use permission::{
    Permission, PermissionOracle, PermissionParseError, PermissionSet, TokenOracle,
};
pub use projector::{project, Listing};
pub use repository::{
    FileGlobalSetRepository, GlobalSetRepository, MemoryGlobalSetRepository, RepositoryError,
};
pub use sites::{SiteError, SiteRegistry, SiteSelection};
pub use visibility::{evaluate, is_visible, HiddenReason, Visibility};

pub use globals_api::{GlobalHandle, GlobalSet, Localization, Site, SiteHandle, ViewRow, ViewRows};

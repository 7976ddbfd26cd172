//! Globals index: the listing as served to the control panel
//!
//! Fetches global sets from the repository and projects them for the acting
//! user and the registry's selected site. Repository failures are returned
//! unchanged.

use globals_api::ViewRows;
use std::sync::Arc;

use crate::config::{ConfigError, ListingConfig};
use crate::edit_target::EditTargetResolver;
use crate::permission::PermissionOracle;
use crate::projector::Listing;
use crate::repository::{GlobalSetRepository, RepositoryError};
use crate::sites::SiteRegistry;

/// Builds the globals listing for a request
#[derive(Clone)]
pub struct GlobalsIndex {
    repository: Arc<dyn GlobalSetRepository>,
    resolver: EditTargetResolver,
}

impl GlobalsIndex {
    pub fn new(
        repository: impl GlobalSetRepository + 'static,
        config: &ListingConfig,
    ) -> Result<Self, ConfigError> {
        let resolver = EditTargetResolver::from_config(config)?;
        Ok(Self::with_resolver(repository, resolver))
    }

    /// Use a custom resolver (e.g. with an application-specific URL builder)
    pub fn with_resolver(
        repository: impl GlobalSetRepository + 'static,
        resolver: EditTargetResolver,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            resolver,
        }
    }

    /// List the global sets visible to `user` in the selected site
    pub fn list(
        &self,
        user: &dyn PermissionOracle,
        sites: &SiteRegistry,
    ) -> Result<ViewRows, RepositoryError> {
        let globals = self.repository.list_all()?;
        let listing = Listing::new(&globals, user, sites.selection(), &self.resolver);
        Ok(listing.collect())
    }
}

impl std::fmt::Debug for GlobalsIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalsIndex")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingPresets;
    use crate::permission::PermissionSet;
    use crate::repository::FileGlobalSetRepository;
    use globals_api::GlobalSet;

    struct FailingRepository;

    impl GlobalSetRepository for FailingRepository {
        fn list_all(&self) -> Result<Vec<GlobalSet>, RepositoryError> {
            Err(RepositoryError::UnsupportedVersion(9))
        }
    }

    #[test]
    fn test_repository_errors_propagate() {
        let index = GlobalsIndex::new(FailingRepository, &ListingPresets::relative()).unwrap();
        let user = PermissionSet::from_tokens(["configure globals"]);

        let result = index.list(&user, &SiteRegistry::single("default"));
        assert!(matches!(result, Err(RepositoryError::UnsupportedVersion(9))));
    }

    #[test]
    fn test_list_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("globals.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "globals": [{"handle": "footer", "sites": ["default"]}]}"#,
        )
        .unwrap();

        let index = GlobalsIndex::new(
            FileGlobalSetRepository::new(&path).unwrap(),
            &ListingPresets::testing(),
        )
        .unwrap();
        let user = PermissionSet::from_tokens(["edit footer globals"]);

        let rows = index.list(&user, &SiteRegistry::single("default")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.get(0).unwrap().edit_url, "http://localhost/cp/globals/footer");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ListingConfig {
            cp_root: "".into(),
            ..ListingConfig::default()
        };
        let result = GlobalsIndex::new(FailingRepository, &config);
        assert!(matches!(result, Err(ConfigError::InvalidCpRoot(_))));
    }
}

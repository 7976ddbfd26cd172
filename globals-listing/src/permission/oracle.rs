//! Permission oracle trait and default implementations
//!
//! The listing only ever asks yes/no questions about the acting user.
//! Framework users can answer them from their own user store by
//! implementing [`PermissionOracle`], or adapt a string-token backend with
//! [`TokenOracle`].

use globals_api::{GlobalHandle, SiteHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

use super::token::Permission;

/// Answers whether the acting user holds a permission
///
/// # Example
///
/// ```rust
/// use globals_listing::permission::{Permission, PermissionOracle};
///
/// struct Admin;
///
/// impl PermissionOracle for Admin {
///     fn has(&self, _permission: &Permission) -> bool {
///         true
///     }
/// }
///
/// assert!(Admin.can_configure_globals());
/// ```
pub trait PermissionOracle: Send + Sync {
    /// Check a single permission
    fn has(&self, permission: &Permission) -> bool;

    /// `configure globals`
    fn can_configure_globals(&self) -> bool {
        self.has(&Permission::ConfigureGlobals)
    }

    /// `edit <handle> globals`
    fn can_edit_global(&self, handle: &GlobalHandle) -> bool {
        self.has(&Permission::EditGlobals(handle.clone()))
    }

    /// `access <site> site`
    fn can_access_site(&self, site: &SiteHandle) -> bool {
        self.has(&Permission::AccessSite(site.clone()))
    }
}

impl<T: PermissionOracle + ?Sized> PermissionOracle for &T {
    fn has(&self, permission: &Permission) -> bool {
        (**self).has(permission)
    }
}

// ============================================================================
// Resolved Permission Set
// ============================================================================

/// The acting user's resolved permissions
///
/// Built from the string tokens produced by role expansion. Tokens that do
/// not describe a known permission are kept aside and grant nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct PermissionSet {
    granted: HashSet<Permission>,
    ignored: Vec<String>,
}

impl PermissionSet {
    /// Create an empty permission set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a permission set from string tokens
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for token in tokens {
            let token = token.as_ref();
            match token.parse::<Permission>() {
                Ok(permission) => {
                    set.granted.insert(permission);
                }
                Err(error) => {
                    warn!(token = token, %error, "Ignoring permission token");
                    set.ignored.push(token.to_string());
                }
            }
        }
        set
    }

    /// Grant a permission
    pub fn grant(mut self, permission: Permission) -> Self {
        self.granted.insert(permission);
        self
    }

    /// Tokens that could not be parsed
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    pub fn len(&self) -> usize {
        self.granted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.granted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Permission> {
        self.granted.iter()
    }
}

impl PermissionOracle for PermissionSet {
    fn has(&self, permission: &Permission) -> bool {
        self.granted.contains(permission)
    }
}

impl From<Vec<String>> for PermissionSet {
    fn from(tokens: Vec<String>) -> Self {
        Self::from_tokens(tokens)
    }
}

impl From<PermissionSet> for Vec<String> {
    fn from(set: PermissionSet) -> Self {
        let mut tokens: Vec<String> = set.granted.iter().map(Permission::token).collect();
        tokens.sort();
        tokens.extend(set.ignored);
        tokens
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self {
            granted: iter.into_iter().collect(),
            ignored: Vec::new(),
        }
    }
}

// ============================================================================
// String Token Adapter
// ============================================================================

/// Adapter for permission backends that only understand string tokens
///
/// ```rust
/// use globals_listing::permission::{PermissionOracle, TokenOracle};
///
/// let oracle = TokenOracle::new(|token: &str| token == "configure globals");
/// assert!(oracle.can_configure_globals());
/// ```
pub struct TokenOracle<F> {
    check: F,
}

impl<F> TokenOracle<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

impl<F> PermissionOracle for TokenOracle<F>
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn has(&self, permission: &Permission) -> bool {
        (self.check)(&permission.token())
    }
}

impl<F> std::fmt::Debug for TokenOracle<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenOracle").finish_non_exhaustive()
    }
}

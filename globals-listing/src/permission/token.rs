//! Structured permission tokens
//!
//! Permissions arrive from the user store as strings such as
//! `"edit footer globals"`. They are parsed once into [`Permission`] so the
//! listing never has to interpolate or compare raw strings.

use globals_api::{GlobalHandle, SiteHandle};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for permission token parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PermissionParseError {
    #[error("Permission token is empty")]
    Empty,

    #[error("Unrecognized permission token: {0}")]
    Unrecognized(String),
}

/// A permission relevant to the globals listing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Permission {
    /// `access cp`
    AccessCp,
    /// `configure globals`: manage every global set regardless of site
    ConfigureGlobals,
    /// `edit <handle> globals`
    EditGlobals(GlobalHandle),
    /// `access <site> site`
    AccessSite(SiteHandle),
}

impl Permission {
    pub fn edit_globals(handle: impl Into<GlobalHandle>) -> Self {
        Self::EditGlobals(handle.into())
    }

    pub fn access_site(site: impl Into<SiteHandle>) -> Self {
        Self::AccessSite(site.into())
    }

    /// Token text as understood by string-based permission backends
    pub fn token(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessCp => f.write_str("access cp"),
            Self::ConfigureGlobals => f.write_str("configure globals"),
            Self::EditGlobals(handle) => write!(f, "edit {} globals", handle),
            Self::AccessSite(site) => write!(f, "access {} site", site),
        }
    }
}

impl FromStr for Permission {
    type Err = PermissionParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = token.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(PermissionParseError::Empty),
            ["access", "cp"] => Ok(Self::AccessCp),
            ["configure", "globals"] => Ok(Self::ConfigureGlobals),
            ["edit", handle, "globals"] => Ok(Self::edit_globals(*handle)),
            ["access", site, "site"] => Ok(Self::access_site(*site)),
            _ => Err(PermissionParseError::Unrecognized(token.trim().to_string())),
        }
    }
}

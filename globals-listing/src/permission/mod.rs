//! Permission model for the globals listing
//!
//! Permissions are parsed from the string tokens of the user store into the
//! structured [`Permission`] enum and queried through a [`PermissionOracle`].
//!
//! | Token | Variant | Effect on the listing |
//! |-------|---------|-----------------------|
//! | `access cp` | `AccessCp` | Checked upstream |
//! | `configure globals` | `ConfigureGlobals` | Every set visible, site access waived |
//! | `edit <handle> globals` | `EditGlobals` | That set visible where localized and accessible |
//! | `access <site> site` | `AccessSite` | Content of that site visible |

pub mod oracle;
pub mod token;

pub use oracle::{PermissionOracle, PermissionSet, TokenOracle};
pub use token::{Permission, PermissionParseError};

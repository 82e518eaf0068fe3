#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod identity;
pub mod role;

pub use identity::IdentityToken;
pub use role::{Role, RoleParseError};

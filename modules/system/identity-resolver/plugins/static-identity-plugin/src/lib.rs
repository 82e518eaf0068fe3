#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static identity resolver
//!
//! Maps configured opaque tokens to marketplace identities. Intended for local
//! development and end-to-end tests with distinct customers, vendors and admins.
//!
//! ## Configuration
//!
//! ```yaml
//! identity:
//!   tokens:
//!     - token: "dev-admin"
//!       identity:
//!         subject_id: "11111111-6a88-4768-9dfc-6bcd5187d9ed"
//!         email: "admin@example.com"
//!         role: ADMIN
//! ```

pub mod config;
pub mod domain;

pub use config::{IdentityConfig, StaticIdentityPluginConfig, TokenMapping};
pub use domain::service::Service as StaticIdentityResolver;

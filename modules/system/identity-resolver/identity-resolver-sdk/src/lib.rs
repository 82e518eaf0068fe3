//! Identity Resolver SDK
//!
//! Public API for turning a presented credential (bearer token or session
//! cookie value) into a verified [`IdentityToken`](marketplace_security::IdentityToken):
//!
//! - [`IdentityResolverClient`] - trait implemented by resolvers
//! - [`IdentityResolverError`] - error types
//!
//! ```ignore
//! use identity_resolver_sdk::IdentityResolverClient;
//!
//! let token = resolver.resolve("opaque-session-value").await?;
//! tracing::debug!(role = %token.role(), "caller resolved");
//! ```

pub mod api;
pub mod error;

pub use api::IdentityResolverClient;
pub use error::IdentityResolverError;

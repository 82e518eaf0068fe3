//! Public API trait for identity resolution.

use async_trait::async_trait;
use marketplace_security::IdentityToken;

use crate::error::IdentityResolverError;

/// Resolves a raw credential into the caller's identity claims.
///
/// Consumed by the identity middleware in front of the access gate. The gate
/// itself never calls a resolver; it only reads the token the middleware
/// attached to the request.
#[async_trait]
pub trait IdentityResolverClient: Send + Sync {
    /// Resolve a credential.
    ///
    /// # Arguments
    ///
    /// * `credential` - The raw credential (without the "Bearer " prefix)
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the credential is invalid, expired, or unknown
    /// - `ServiceUnavailable` if the session backend is not reachable
    /// - `Internal` for unexpected errors
    async fn resolve(&self, credential: &str) -> Result<IdentityToken, IdentityResolverError>;
}

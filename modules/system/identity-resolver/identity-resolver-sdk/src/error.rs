//! Error types for identity resolution.

use thiserror::Error;

/// Errors that can occur when resolving a credential.
#[derive(Debug, Error)]
pub enum IdentityResolverError {
    /// The credential is invalid, expired, or unknown.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The backing session store cannot be reached right now.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

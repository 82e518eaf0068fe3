//! Implements `IdentityResolverClient` using the domain service.

use async_trait::async_trait;
use identity_resolver_sdk::{IdentityResolverClient, IdentityResolverError};
use marketplace_security::IdentityToken;

use super::service::Service;

#[async_trait]
impl IdentityResolverClient for Service {
    async fn resolve(&self, credential: &str) -> Result<IdentityToken, IdentityResolverError> {
        self.lookup(credential)
            .ok_or_else(|| IdentityResolverError::Unauthorized("unknown token".to_owned()))
    }
}

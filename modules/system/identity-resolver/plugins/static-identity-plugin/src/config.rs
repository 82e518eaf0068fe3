//! Configuration for the static identity resolver.

use marketplace_security::{IdentityToken, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Plugin configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaticIdentityPluginConfig {
    /// Static token-to-identity mappings.
    pub tokens: Vec<TokenMapping>,
}

/// Identity claims returned for a token.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    pub subject_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl From<&IdentityConfig> for IdentityToken {
    fn from(cfg: &IdentityConfig) -> Self {
        IdentityToken::new(cfg.subject_id, cfg.email.clone(), cfg.role)
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The credential value to match.
    pub token: String,
    /// The identity to return when this token is presented.
    pub identity: IdentityConfig,
}

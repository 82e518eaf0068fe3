//! Token lookup for the static identity resolver.

use std::collections::HashMap;

use marketplace_security::IdentityToken;

use crate::config::StaticIdentityPluginConfig;

/// Static identity resolver service.
///
/// Every configured token maps to exactly one identity. Later entries with a
/// duplicate token replace earlier ones.
#[derive(Debug, Clone)]
pub struct Service {
    token_map: HashMap<String, IdentityToken>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticIdentityPluginConfig) -> Self {
        let token_map: HashMap<String, IdentityToken> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), IdentityToken::from(&m.identity)))
            .collect();

        tracing::debug!(tokens = token_map.len(), "Static identity map loaded");

        Self { token_map }
    }

    /// Look up a credential.
    ///
    /// Returns `None` for an empty or unknown credential.
    #[must_use]
    pub fn lookup(&self, credential: &str) -> Option<IdentityToken> {
        if credential.is_empty() {
            return None;
        }
        self.token_map.get(credential).cloned()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token_map.is_empty()
    }
}

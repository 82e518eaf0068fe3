use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{ProtectionLevel, RouteTable, matches_prefix};

fn default_login_path() -> String {
    "/login".to_owned()
}

fn default_return_to_param() -> String {
    "callbackUrl".to_owned()
}

fn default_session_cookie() -> String {
    "session".to_owned()
}

fn default_bypass_prefixes() -> Vec<String> {
    vec![
        "/static".to_owned(),
        "/assets".to_owned(),
        "/favicon.ico".to_owned(),
    ]
}

/// Access gate configuration.
///
/// The route table itself is compiled in; only the login flow and the set of
/// paths the gate ignores are configurable.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    /// Where unauthenticated callers are redirected.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Query parameter on the login redirect carrying the original path.
    #[serde(default = "default_return_to_param")]
    pub return_to_param: String,

    /// Cookie holding the session credential when no bearer header is sent.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Paths the gate does not inspect at all (static assets).
    #[serde(default = "default_bypass_prefixes")]
    pub bypass_prefixes: Vec<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            return_to_param: default_return_to_param(),
            session_cookie: default_session_cookie(),
            bypass_prefixes: default_bypass_prefixes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("login_path must be an absolute path, got {0:?}")]
    RelativeLoginPath(String),
    #[error("login_path {path:?} is protected ({level}); the login redirect would loop")]
    ProtectedLoginPath {
        path: String,
        level: ProtectionLevel,
    },
    #[error("return_to_param must not be empty")]
    EmptyReturnToParam,
    #[error("session_cookie must not be empty")]
    EmptySessionCookie,
    #[error("bypass prefix must start with '/', got {0:?}")]
    RelativeBypassPrefix(String),
    #[error("bypass prefix {path:?} would skip a protected route ({level})")]
    ProtectedBypassPrefix {
        path: String,
        level: ProtectionLevel,
    },
}

impl GateConfig {
    /// Check the configuration against the route table.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self, table: &RouteTable) -> Result<(), ConfigError> {
        if !self.login_path.starts_with('/') {
            return Err(ConfigError::RelativeLoginPath(self.login_path.clone()));
        }
        let level = table.classify(&self.login_path);
        if level != ProtectionLevel::Public {
            return Err(ConfigError::ProtectedLoginPath {
                path: self.login_path.clone(),
                level,
            });
        }
        if self.return_to_param.is_empty() {
            return Err(ConfigError::EmptyReturnToParam);
        }
        if self.session_cookie.is_empty() {
            return Err(ConfigError::EmptySessionCookie);
        }
        for prefix in &self.bypass_prefixes {
            if !prefix.starts_with('/') {
                return Err(ConfigError::RelativeBypassPrefix(prefix.clone()));
            }
            if let Some(level) = protected_overlap(table, prefix) {
                return Err(ConfigError::ProtectedBypassPrefix {
                    path: prefix.clone(),
                    level,
                });
            }
        }
        Ok(())
    }
}

/// Level of the first rule whose prefix overlaps `bypass` in either direction.
fn protected_overlap(table: &RouteTable, bypass: &str) -> Option<ProtectionLevel> {
    table
        .rules()
        .iter()
        .find(|rule| {
            rule.prefixes
                .iter()
                .any(|p| matches_prefix(p, bypass) || matches_prefix(bypass, p))
        })
        .map(|rule| rule.level)
}

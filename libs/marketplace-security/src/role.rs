use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marketplace role carried by an authenticated caller.
///
/// Anonymous callers have no role at all; they are modeled as the absence of an
/// [`IdentityToken`](crate::IdentityToken), never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Customer account.
    User,
    /// Lists and sells tools.
    Vendor,
    /// Marketplace operator.
    Admin,
    /// Affiliate program participant.
    Affiliate,
}

impl Role {
    pub const ALL: [Self; 4] = [Self::User, Self::Vendor, Self::Admin, Self::Affiliate];

    /// Wire name of the role (`"ADMIN"`, `"VENDOR"`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Vendor => "VENDOR",
            Self::Admin => "ADMIN",
            Self::Affiliate => "AFFILIATE",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?}")]
pub struct RoleParseError(pub String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| RoleParseError(s.to_owned()))
    }
}

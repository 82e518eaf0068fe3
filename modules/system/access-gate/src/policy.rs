use marketplace_security::{IdentityToken, Role};
use thiserror::Error;

use crate::classifier::ProtectionLevel;

/// Outcome of evaluating a protection level against the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    /// No identity token on the request.
    DenyUnauthenticated,
    /// Token present but its role does not satisfy the level.
    DenyForbidden,
}

/// Expected access-control outcomes. These are normal results, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessDenied {
    #[error("authentication required")]
    Unauthenticated,
    #[error("insufficient role")]
    Forbidden,
}

impl Verdict {
    /// # Errors
    /// Returns the matching [`AccessDenied`] kind for either deny verdict.
    pub fn into_result(self) -> Result<(), AccessDenied> {
        match self {
            Self::Allow => Ok(()),
            Self::DenyUnauthenticated => Err(AccessDenied::Unauthenticated),
            Self::DenyForbidden => Err(AccessDenied::Forbidden),
        }
    }
}

/// Decide whether a caller satisfies `level`.
#[must_use]
pub fn evaluate(level: ProtectionLevel, token: Option<&IdentityToken>) -> Verdict {
    if level == ProtectionLevel::Public {
        return Verdict::Allow;
    }

    let Some(token) = token else {
        return Verdict::DenyUnauthenticated;
    };

    if role_satisfies(level, token.role()) {
        Verdict::Allow
    } else {
        Verdict::DenyForbidden
    }
}

fn role_satisfies(level: ProtectionLevel, role: Role) -> bool {
    match level {
        ProtectionLevel::Public | ProtectionLevel::Authenticated => true,
        ProtectionLevel::VendorOrAdmin => match role {
            Role::Vendor | Role::Admin => true,
            Role::User | Role::Affiliate => false,
        },
        ProtectionLevel::Admin => match role {
            Role::Admin => true,
            Role::User | Role::Vendor | Role::Affiliate => false,
        },
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn token(role: Role) -> IdentityToken {
        IdentityToken::new(Uuid::nil(), "caller@example.com", role)
    }

    #[test]
    fn public_always_allows() {
        assert_eq!(evaluate(ProtectionLevel::Public, None), Verdict::Allow);
        for role in Role::ALL {
            assert_eq!(
                evaluate(ProtectionLevel::Public, Some(&token(role))),
                Verdict::Allow
            );
        }
    }

    #[test]
    fn authenticated_allows_any_role() {
        assert_eq!(
            evaluate(ProtectionLevel::Authenticated, None),
            Verdict::DenyUnauthenticated
        );
        for role in Role::ALL {
            assert_eq!(
                evaluate(ProtectionLevel::Authenticated, Some(&token(role))),
                Verdict::Allow
            );
        }
    }

    #[test]
    fn admin_level_splits_absent_and_wrong_role() {
        assert_eq!(
            evaluate(ProtectionLevel::Admin, None),
            Verdict::DenyUnauthenticated
        );
        for role in Role::ALL {
            let expected = if role == Role::Admin {
                Verdict::Allow
            } else {
                Verdict::DenyForbidden
            };
            assert_eq!(
                evaluate(ProtectionLevel::Admin, Some(&token(role))),
                expected,
                "{role}"
            );
        }
    }

    #[test]
    fn vendor_level_allows_vendor_and_admin() {
        assert_eq!(
            evaluate(ProtectionLevel::VendorOrAdmin, None),
            Verdict::DenyUnauthenticated
        );
        for role in Role::ALL {
            let expected = if matches!(role, Role::Vendor | Role::Admin) {
                Verdict::Allow
            } else {
                Verdict::DenyForbidden
            };
            assert_eq!(
                evaluate(ProtectionLevel::VendorOrAdmin, Some(&token(role))),
                expected,
                "{role}"
            );
        }
    }

    #[test]
    fn verdict_maps_to_access_denied() {
        assert_eq!(Verdict::Allow.into_result(), Ok(()));
        assert_eq!(
            Verdict::DenyUnauthenticated.into_result(),
            Err(AccessDenied::Unauthenticated)
        );
        assert_eq!(
            Verdict::DenyForbidden.into_result(),
            Err(AccessDenied::Forbidden)
        );
    }
}

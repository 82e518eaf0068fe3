use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

/// `IdentityToken` is the verified bundle of claims about a caller.
///
/// Produced by the identity resolver when a session is established and attached
/// to the request. It is read-only for the rest of the request lifecycle; the
/// access gate inspects it but never changes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityToken {
    /// Subject ID of the account making the request.
    subject_id: Uuid,
    email: String,
    role: Role,
}

impl IdentityToken {
    #[must_use]
    pub fn new(subject_id: Uuid, email: impl Into<String>, role: Role) -> Self {
        Self {
            subject_id,
            email: email.into(),
            role,
        }
    }

    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

//! Authentication types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Privilege levels a credential can carry.
///
/// The set is closed: a credential whose role claim falls outside it fails
/// deserialization and is rejected as an invalid credential. Roles are
/// unordered; `Admin` is the only role that bypasses ownership checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Full access, bypasses ownership checks.
    Admin,
    /// Can create and modify owned resources.
    Editor,
    /// Read-only access.
    Viewer,
}

impl Role {
    /// Whether this role short-circuits ownership checks.
    pub fn bypasses_ownership(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Stable name used in responses and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,
    /// User role.
    pub role: Role,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Create new claims expiring `expires_in` seconds from now.
    pub fn new(user_id: impl Into<String>, role: Role, expires_in: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.into(),
            role,
            iat: now,
            exp: now + expires_in,
        }
    }

    /// Check if the claims are past their expiration timestamp.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Authenticated user context, attached to the request on successful
/// credential verification and dropped when the request completes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Identity reference from the credential's subject claim.
    pub id: String,
    /// Role from the credential.
    pub role: Role,
}

impl AuthUser {
    /// Create from verified claims.
    ///
    /// Returns `None` when the subject is empty; a signature-valid credential
    /// without an identity is a verification fault, not a usable context.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        if claims.sub.is_empty() {
            return None;
        }
        Some(Self {
            id: claims.sub.clone(),
            role: claims.role,
        })
    }

    /// Check if user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_expiry_window() {
        let claims = Claims::new("u1", Role::Editor, 3600);
        assert!(!claims.is_expired());

        let stale = Claims::new("u1", Role::Editor, -3600);
        assert!(stale.is_expired());
    }

    #[test]
    fn test_auth_user_from_claims() {
        let claims = Claims::new("u1", Role::Viewer, 3600);
        let user = AuthUser::from_claims(&claims).unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.role, Role::Viewer);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_empty_subject_yields_no_context() {
        let claims = Claims::new("", Role::Editor, 3600);
        assert!(AuthUser::from_claims(&claims).is_none());
    }

    #[test]
    fn test_only_admin_bypasses_ownership() {
        assert!(Role::Admin.bypasses_ownership());
        assert!(!Role::Editor.bypasses_ownership());
        assert!(!Role::Viewer.bypasses_ownership());
    }

    #[test]
    fn test_role_claim_outside_the_set_fails_deserialization() {
        let result: Result<Role, _> = serde_json::from_str("\"SuperUser\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"Admin\"");
        assert_eq!(Role::Editor.to_string(), "Editor");
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission strings and the check applied before every handler.

use super::{AuthError, Claims};

/// Permission required by each operation on one resource type.
///
/// Permission strings are colon-delimited capability tags such as
/// `post:card`, matched exactly against the token's `permissions` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePermissions {
    pub list: &'static str,
    pub get: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl ResourcePermissions {
    /// All five permission strings, in operation order.
    pub fn all(&self) -> [&'static str; 5] {
        [self.list, self.get, self.create, self.update, self.delete]
    }
}

/// Require `required` in the caller's permission set.
///
/// Succeeds only when the permission is present. A token without any
/// `permissions` claim is rejected differently from one that lacks this
/// particular permission.
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_ref()
        .ok_or(AuthError::ClaimsMissingPermissions)?;

    if !permissions.contains(required) {
        return Err(AuthError::PermissionDenied);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims_with(permissions: Option<&[&str]>) -> Claims {
        Claims {
            issuer: "https://tenant.auth0.com/".to_string(),
            subject: "auth0|member".to_string(),
            audience: "gacha".to_string(),
            expiry: Utc::now(),
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        }
    }

    #[test]
    fn present_permission_passes() {
        let claims = claims_with(Some(&["get:cards", "post:card"]));
        assert!(check_permission("post:card", &claims).is_ok());
    }

    #[test]
    fn absent_permission_is_denied() {
        let claims = claims_with(Some(&["get:cards"]));
        let err = check_permission("post:card", &claims).unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied));
    }

    #[test]
    fn missing_permission_claim_is_distinguished() {
        let claims = claims_with(None);
        let err = check_permission("get:cards", &claims).unwrap_err();
        assert!(matches!(err, AuthError::ClaimsMissingPermissions));
    }

    #[test]
    fn empty_permission_set_is_denied_not_missing() {
        let claims = claims_with(Some(&[]));
        let err = check_permission("get:cards", &claims).unwrap_err();
        assert!(matches!(err, AuthError::PermissionDenied));
    }

    #[test]
    fn matching_is_exact() {
        let claims = claims_with(Some(&["get:card"]));
        assert!(check_permission("get:cards", &claims).is_err());
        assert!(check_permission("GET:card", &claims).is_err());
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! Every variant carries a stable `code()` used in logs. Clients never see it:
//! all variants render the same generic 401 envelope.

use axum::response::{IntoResponse, Response};

use super::jwks::KeyFetchError;
use crate::error::ApiError;

/// Reasons a request failed authentication or authorization.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on the request
    #[error("Authorization header is expected")]
    MissingHeader,
    /// Header is not exactly `Bearer <token>`
    #[error("Authorization header must be a bearer token")]
    MalformedHeader,
    /// Token header carries no key id
    #[error("Token header has no key id")]
    MalformedToken,
    /// No published key matches the token's key id
    #[error("Unable to find the appropriate signing key")]
    KeyNotFound,
    /// Key set could not be retrieved
    #[error("Failed to fetch signing keys: {0}")]
    KeyFetch(#[from] KeyFetchError),
    /// `exp` is in the past
    #[error("Token expired")]
    TokenExpired,
    /// Audience or issuer mismatch, or a required claim is missing
    #[error("Incorrect claims, check the audience and issuer")]
    InvalidClaims,
    /// Signature, algorithm or structural failure
    #[error("Unable to parse authentication token")]
    InvalidToken,
    /// Claims carry no `permissions` array
    #[error("Permissions not included in token")]
    ClaimsMissingPermissions,
    /// Required permission absent from the token
    #[error("Permission not found")]
    PermissionDenied,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MissingHeader => "missing_header",
            AuthError::MalformedHeader => "malformed_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::KeyNotFound => "key_not_found",
            AuthError::KeyFetch(_) => "key_fetch_failed",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidClaims => "invalid_claims",
            AuthError::InvalidToken => "invalid_token",
            AuthError::ClaimsMissingPermissions => "claims_missing_permissions",
            AuthError::PermissionDenied => "permission_denied",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::unauthorized().into_response()
    }
}

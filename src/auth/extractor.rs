// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the verified caller.
//!
//! Use the `Auth` extractor in handlers mounted behind
//! [`require_permission`](super::middleware::require_permission):
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims is Claims
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, Claims};

/// Claims of the caller, as verified by the permission middleware.
pub struct Auth(pub Claims);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A handler reachable without the middleware is treated as unauthenticated.
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingHeader)
    }
}

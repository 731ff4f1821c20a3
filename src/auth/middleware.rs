// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Permission-checking middleware for Axum.
//!
//! Each route method is wrapped with its own [`PermissionGate`]:
//!
//! ```rust,ignore
//! let gate = PermissionGate::new(verifier.clone(), "post:card");
//! let route = post(create_card)
//!     .route_layer(axum::middleware::from_fn_with_state(gate, require_permission));
//! ```
//!
//! On success the verified [`Claims`] are placed in the request extensions,
//! where the [`Auth`](super::Auth) extractor picks them up.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::permissions::check_permission;
use super::{AuthError, Claims, TokenVerifier};

/// A verifier paired with the one permission a route requires.
#[derive(Clone)]
pub struct PermissionGate {
    verifier: Arc<TokenVerifier>,
    permission: &'static str,
}

impl PermissionGate {
    pub fn new(verifier: Arc<TokenVerifier>, permission: &'static str) -> Self {
        Self {
            verifier,
            permission,
        }
    }

    pub fn permission(&self) -> &'static str {
        self.permission
    }

    /// Verify the request's bearer token and require this gate's permission.
    pub async fn authorize(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let claims = self.verifier.verify(headers.get(AUTHORIZATION)).await?;
        check_permission(self.permission, &claims)?;
        Ok(claims)
    }
}

/// Authentication middleware function.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Response {
    match gate.authorize(request.headers()).await {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            if let AuthError::KeyFetch(ref cause) = e {
                tracing::error!(error = %cause, "Signing keys unavailable");
            }
            tracing::warn!(
                code = e.code(),
                permission = gate.permission,
                path = %request.uri().path(),
                "Request rejected: {e}"
            );
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Auth;
    use crate::test_support::{self, TokenSpec};
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        let gate = PermissionGate::new(Arc::new(test_support::verifier()), "get:cards");
        Router::new().route(
            "/cards",
            get(|Auth(claims): Auth| async move { claims.subject })
                .route_layer(axum::middleware::from_fn_with_state(gate, require_permission)),
        )
    }

    fn request(authorization: Option<String>) -> Request {
        let mut builder = Request::builder().uri("/cards");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn permitted_request_reaches_handler_with_claims() {
        let response = app()
            .oneshot(request(Some(TokenSpec::member().bearer())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body, test_support::SUBJECT.as_bytes());
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        let response = app().oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn missing_permission_is_unauthorized() {
        let token = TokenSpec::with_permissions(&["get:skills"]).bearer();
        let response = app().oneshot(request(Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn token_without_permissions_claim_is_unauthorized() {
        let token = TokenSpec::without_permissions().bearer();
        let response = app().oneshot(request(Some(token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn authorize_reports_specific_code() {
        let gate = PermissionGate::new(Arc::new(test_support::verifier()), "post:card");
        let err = gate
            .authorize(request(Some(TokenSpec::member().bearer())).headers())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "permission_denied");
        assert_eq!(gate.permission(), "post:card");
    }

    #[tokio::test]
    async fn empty_authorization_header_is_reported_missing() {
        let gate = PermissionGate::new(Arc::new(test_support::verifier()), "get:cards");
        let err = gate
            .authorize(request(Some(String::new())).headers())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "missing_header");

        let response = app().oneshot(request(Some(String::new()))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

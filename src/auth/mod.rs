// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Permission checks backed by an external identity provider's JWTs.
//!
//! ## Auth Flow
//!
//! 1. Client obtains an RS256 access token from the provider
//! 2. Client sends `Authorization: Bearer <token>`
//! 3. Server, per request:
//!    - Fetches the provider JWKS via HTTPS
//!    - Verifies signature, expiry, issuer, audience
//!    - Requires the route's permission string in the `permissions` claim
//!
//! Every failure answers 401; the precise cause is logged, never returned.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod jwks;
pub mod middleware;
pub mod permissions;
pub mod verifier;

pub use claims::Claims;
pub use error::AuthError;
pub use extractor::Auth;
pub use jwks::{JwksFetcher, KeyFetchError, KeySource};
pub use middleware::{require_permission, PermissionGate};
pub use permissions::{check_permission, ResourcePermissions};
pub use verifier::TokenVerifier;

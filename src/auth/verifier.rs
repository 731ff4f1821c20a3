// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification against the provider's published keys.
//!
//! ## Flow
//!
//! 1. Split `Authorization: Bearer <token>`
//! 2. Read the unverified token header for `kid`
//! 3. Fetch the JWKS and pick the key with that `kid`
//! 4. Verify the RS256 signature, `aud`, `iss` and `exp` (no leeway)

use std::sync::Arc;

use axum::http::HeaderValue;
use jsonwebtoken::{
    decode, decode_header,
    errors::ErrorKind,
    jwk::{AlgorithmParameters, Jwk},
    Algorithm, DecodingKey, Validation,
};

use super::claims::TokenClaims;
use super::jwks::KeySource;
use super::{AuthError, Claims};

/// The provider signs access tokens with RS256 only.
const SIGNING_ALGORITHM: Algorithm = Algorithm::RS256;

/// Extract the token from an `Authorization` header value.
///
/// The value must be exactly two whitespace-separated parts, the first
/// being `bearer` in any case. An empty value counts as no header.
pub fn bearer_token(header: Option<&HeaderValue>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let value = header.to_str().map_err(|_| AuthError::MalformedHeader)?;
    if value.trim().is_empty() {
        return Err(AuthError::MissingHeader);
    }

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}

/// Verifies provider-issued access tokens.
pub struct TokenVerifier {
    keys: Arc<dyn KeySource>,
    issuer: String,
    audience: String,
}

impl TokenVerifier {
    /// # Arguments
    /// - `keys`: where signing keys are fetched from on every verification
    /// - `issuer`: expected `iss`, e.g. `https://tenant.auth0.com/`
    /// - `audience`: expected `aud`, the API identifier
    pub fn new(
        keys: Arc<dyn KeySource>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    pub fn key_source(&self) -> &dyn KeySource {
        self.keys.as_ref()
    }

    /// Verify the bearer token carried by an `Authorization` header.
    pub async fn verify(&self, header: Option<&HeaderValue>) -> Result<Claims, AuthError> {
        let token = bearer_token(header)?;
        self.verify_token(token).await
    }

    /// Verify a raw compact-serialized JWT.
    pub async fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| AuthError::InvalidToken)?;
        let kid = header.kid.ok_or(AuthError::MalformedToken)?;

        let jwks = self.keys.fetch_keys().await?;
        let jwk = jwks
            .keys
            .iter()
            .find(|k| k.common.key_id.as_deref() == Some(kid.as_str()))
            .ok_or(AuthError::KeyNotFound)?;
        let decoding_key = rsa_decoding_key(jwk)?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidAudience
                | ErrorKind::InvalidIssuer
                | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims,
                _ => AuthError::InvalidToken,
            }
        })?;

        Claims::from_token(token_data.claims, &self.audience).ok_or(AuthError::InvalidToken)
    }
}

/// Build an RSA verification key from a JWK's modulus and exponent.
fn rsa_decoding_key(jwk: &Jwk) -> Result<DecodingKey, AuthError> {
    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => {
            DecodingKey::from_rsa_components(&rsa.n, &rsa.e).map_err(|_| AuthError::InvalidToken)
        }
        _ => Err(AuthError::InvalidToken),
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and their validated, request-scoped form.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Payload of a provider access token as it appears on the wire.
///
/// Signature, `exp`, `iss` and `aud` are validated by `jsonwebtoken` before
/// this is turned into [`Claims`].
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Issuer (provider tenant URL)
    pub iss: String,
    /// Subject (provider user id)
    pub sub: String,
    /// Audience, a single identifier or a list of them
    pub aud: Audience,
    /// Expiration timestamp
    pub exp: i64,
    /// Granted permission strings, e.g. `post:card`
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// The `aud` claim may be a string or an array of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Verified claims of the caller, available to handlers for the duration of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub issuer: String,
    pub subject: String,
    /// The audience the token was accepted for
    pub audience: String,
    pub expiry: DateTime<Utc>,
    /// `None` when the token has no `permissions` claim at all
    pub permissions: Option<BTreeSet<String>>,
}

impl Claims {
    /// Build from wire claims. `accepted_audience` is the configured API
    /// identifier the token was validated against.
    ///
    /// Returns `None` if `exp` is not a representable timestamp.
    pub fn from_token(claims: TokenClaims, accepted_audience: &str) -> Option<Self> {
        let expiry = DateTime::from_timestamp(claims.exp, 0)?;
        let audience = match claims.aud {
            Audience::One(aud) => aud,
            Audience::Many(auds) => auds
                .into_iter()
                .find(|aud| aud == accepted_audience)
                .unwrap_or_else(|| accepted_audience.to_string()),
        };

        Some(Self {
            issuer: claims.iss,
            subject: claims.sub,
            audience,
            expiry,
            permissions: claims.permissions.map(|p| p.into_iter().collect()),
        })
    }
}

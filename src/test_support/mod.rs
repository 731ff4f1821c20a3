// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared fixtures for unit tests: a fixed key set, token minting and a
//! temporary application state.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, jwk::JwkSet, Algorithm, EncodingKey, Header};
use tempfile::TempDir;

use crate::auth::{KeyFetchError, KeySource, TokenVerifier};
use crate::state::AppState;
use crate::storage::CatalogDatabase;

pub const ISSUER: &str = "https://gacha-test.auth.example/";
pub const AUDIENCE: &str = "gacha";
pub const SUBJECT: &str = "auth0|5dc9064170e30f0e62660cb4";

pub const SIGNING_KEY_ID: &str = "catalog-test-key-1";
pub const ROGUE_KEY_ID: &str = "catalog-test-key-2";

const SIGNING_KEY_PEM: &str = include_str!("signing_key.pem");
const SIGNING_KEY_N: &str = "thE0vhetBrZie9wNaYGz2vpd0s0cKomNOfQw2Q3AjeNhyMCxtQmwGGaq_6c2chMS7DZd6C8AIUmPBpYMFd8ka7dwNcOweG74qAUN830heUcjSONoQWfjXOEaCKeUB_t1FQbWXWa6NQrdaBNl1hlDSkJuxAsUszCV9qHXgPcDZ9jCRQgHbg7dK0Uy6o_pV3MxiSgSzlGnlyY5s5Dj2RrcTamKcCYvyFrgSE2jY-p8XbH9hibqMujwx5-8RPzVpul99QPVvcl0TqgmoFyOD9mD3ABS_GxcnhIMPpa1hBkfqBbXPwSIdCgCjEFo3-81ypYEAVfa2AHam_BwxvZ_F5xKiQ";

const ROGUE_KEY_PEM: &str = include_str!("rogue_key.pem");
const ROGUE_KEY_N: &str = "5n3GnINcSC9dO-WwVIRe3TQHfFDGuBcUG3om5IMaNIrx38NY7Ruask25zpAyZ-FNz9OASgXeqPP8lvA9Ju78lvi8qcNMHgsCBkAxy9LuBg4nR0K6JPYy979F40cSWg-KLIdgs016b_NqyLHLJnIziO3vrEq8eGSu5mdRJiqXLAmbJl4sG-oT6-WVx_U1BDjv21WvTMAYnE1gPlSEVQkJRhnEPJpivtvgtBR79wLTE75iMSMGMs_MH3AwAPbSdekKiIIVweuEYtcpr42jjj0gw_QIWeG6vAQ88AqltRoYtLKl5CXSfO7Vw08rXzZ1ktbP4Xl-zZ2zq-iv50Zru6qG2Q";

/// Read-only role.
pub const MEMBER_PERMISSIONS: &[&str] = &[
    "get:card",
    "get:cards",
    "get:character",
    "get:characters",
    "get:skill",
    "get:skills",
];

/// Full read/write role.
pub const CONTRIBUTOR_PERMISSIONS: &[&str] = &[
    "delete:card",
    "delete:character",
    "delete:skill",
    "get:card",
    "get:cards",
    "get:character",
    "get:characters",
    "get:skill",
    "get:skills",
    "patch:card",
    "patch:character",
    "patch:skill",
    "post:card",
    "post:character",
    "post:skill",
];

fn jwk_json(kid: &str, n: &str) -> serde_json::Value {
    serde_json::json!({
        "kty": "RSA",
        "use": "sig",
        "alg": "RS256",
        "kid": kid,
        "n": n,
        "e": "AQAB",
    })
}

/// The key set document the test provider publishes.
pub fn jwks_document() -> serde_json::Value {
    serde_json::json!({ "keys": [jwk_json(SIGNING_KEY_ID, SIGNING_KEY_N)] })
}

/// Key set with a second key published during a rotation.
pub fn rotated_jwks_document() -> serde_json::Value {
    serde_json::json!({
        "keys": [
            jwk_json(SIGNING_KEY_ID, SIGNING_KEY_N),
            jwk_json(ROGUE_KEY_ID, ROGUE_KEY_N),
        ]
    })
}

/// In-process key source serving a fixed key set.
pub struct StaticKeys(pub JwkSet);

#[async_trait]
impl KeySource for StaticKeys {
    async fn fetch_keys(&self) -> Result<JwkSet, KeyFetchError> {
        Ok(self.0.clone())
    }
}

fn verifier_for(document: serde_json::Value) -> TokenVerifier {
    let jwks: JwkSet = serde_json::from_value(document).expect("fixture JWKS parses");
    TokenVerifier::new(Arc::new(StaticKeys(jwks)), ISSUER, AUDIENCE)
}

pub fn verifier() -> TokenVerifier {
    verifier_for(jwks_document())
}

pub fn verifier_with_rotated_keys() -> TokenVerifier {
    verifier_for(rotated_jwks_document())
}

/// Application state over a fresh database in a temporary directory.
pub fn test_state() -> (AppState, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db = CatalogDatabase::open(&dir.path().join("catalog.redb")).expect("Failed to open db");
    let state = AppState::new(db, verifier());
    (state, dir)
}

/// Describes a token to mint; defaults to a valid token for the test provider.
#[derive(Debug, Clone)]
pub struct TokenSpec {
    permissions: Option<Vec<String>>,
    expires_in: i64,
    audience: String,
    issuer: String,
    kid: Option<String>,
    rogue_key: bool,
}

impl TokenSpec {
    pub fn with_permissions(permissions: &[&str]) -> Self {
        Self {
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
            expires_in: 3600,
            audience: AUDIENCE.to_string(),
            issuer: ISSUER.to_string(),
            kid: Some(SIGNING_KEY_ID.to_string()),
            rogue_key: false,
        }
    }

    pub fn member() -> Self {
        Self::with_permissions(MEMBER_PERMISSIONS)
    }

    pub fn contributor() -> Self {
        Self::with_permissions(CONTRIBUTOR_PERMISSIONS)
    }

    /// Token with no `permissions` claim at all.
    pub fn without_permissions() -> Self {
        Self {
            permissions: None,
            ..Self::with_permissions(&[])
        }
    }

    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = seconds;
        self
    }

    pub fn audience(mut self, audience: &str) -> Self {
        self.audience = audience.to_string();
        self
    }

    pub fn issuer(mut self, issuer: &str) -> Self {
        self.issuer = issuer.to_string();
        self
    }

    pub fn without_kid(mut self) -> Self {
        self.kid = None;
        self
    }

    /// Sign with the second fixture key, advertising `kid` in the header.
    pub fn signed_by_rogue_key(mut self, kid: &str) -> Self {
        self.kid = Some(kid.to_string());
        self.rogue_key = true;
        self
    }

    pub fn mint(&self) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.kid.clone();

        let now = Utc::now().timestamp();
        let mut claims = serde_json::json!({
            "iss": self.issuer,
            "sub": SUBJECT,
            "aud": self.audience,
            "iat": now,
            "exp": now + self.expires_in,
            "scope": "",
        });
        if let Some(permissions) = &self.permissions {
            claims["permissions"] = serde_json::json!(permissions);
        }

        let pem = if self.rogue_key {
            ROGUE_KEY_PEM
        } else {
            SIGNING_KEY_PEM
        };
        let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture key parses");
        encode(&header, &claims, &key).expect("token encodes")
    }

    /// `Authorization` header value carrying the minted token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.mint())
    }
}

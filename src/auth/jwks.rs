// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching.
//!
//! The key set is fetched on every verification so rotated provider keys are
//! picked up immediately. Nothing is cached between requests.

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::jwk::JwkSet;

/// Default timeout for a single key set request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a key set could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum KeyFetchError {
    #[error("request to JWKS endpoint failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP {0} from JWKS endpoint")]
    Status(reqwest::StatusCode),

    #[error("JWKS document could not be parsed: {0}")]
    Parse(#[source] reqwest::Error),
}

/// Source of the signing keys tokens are verified against.
#[async_trait]
pub trait KeySource: Send + Sync {
    /// Return the currently published keys, in document order.
    async fn fetch_keys(&self) -> Result<JwkSet, KeyFetchError>;
}

/// Fetches the provider's `/.well-known/jwks.json` over HTTP.
#[derive(Clone)]
pub struct JwksFetcher {
    /// JWKS URL (provider endpoint)
    jwks_url: String,
    /// HTTP client
    client: reqwest::Client,
}

impl JwksFetcher {
    /// Create a fetcher with the default request timeout.
    pub fn new(jwks_url: impl Into<String>) -> Result<Self, KeyFetchError> {
        Self::with_timeout(jwks_url, DEFAULT_FETCH_TIMEOUT)
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(
        jwks_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, KeyFetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(KeyFetchError::Transport)?;
        Ok(Self {
            jwks_url: jwks_url.into(),
            client,
        })
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }
}

#[async_trait]
impl KeySource for JwksFetcher {
    async fn fetch_keys(&self) -> Result<JwkSet, KeyFetchError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(KeyFetchError::Transport)?;

        if !response.status().is_success() {
            return Err(KeyFetchError::Status(response.status()));
        }

        let jwks: JwkSet = response.json().await.map_err(KeyFetchError::Parse)?;
        tracing::debug!(keys = jwks.keys.len(), url = %self.jwks_url, "Fetched JWKS");

        Ok(jwks)
    }
}

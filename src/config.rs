// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is read from the environment at startup (optionally seeded
//! from a `.env` file).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `DATA_DIR` | Directory holding `catalog.redb` | `./data` |
//! | `AUTH_DOMAIN` | Identity provider domain, e.g. `tenant.auth0.com` | Required unless both URLs below are set |
//! | `AUTH_JWKS_URL` | JWKS endpoint for JWT verification | `https://<AUTH_DOMAIN>/.well-known/jwks.json` |
//! | `AUTH_ISSUER` | Expected JWT issuer claim | `https://<AUTH_DOMAIN>/` |
//! | `AUTH_AUDIENCE` | Expected JWT audience claim (API identifier) | Required |
//! | `JWKS_TIMEOUT_SECS` | Timeout of one JWKS fetch | `10` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use url::Url;

use crate::storage::DATABASE_FILE;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";

/// Environment variable name for the catalog data directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

pub const AUTH_DOMAIN_ENV: &str = "AUTH_DOMAIN";
pub const AUTH_JWKS_URL_ENV: &str = "AUTH_JWKS_URL";
pub const AUTH_ISSUER_ENV: &str = "AUTH_ISSUER";
pub const AUTH_AUDIENCE_ENV: &str = "AUTH_AUDIENCE";
pub const JWKS_TIMEOUT_ENV: &str = "JWKS_TIMEOUT_SECS";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_JWKS_TIMEOUT_SECS: u64 = 10;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!("expected `json` or `pretty`, got `{other}`")),
        }
    }
}

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSettings {
    pub jwks_url: String,
    pub issuer: String,
    pub audience: String,
    pub jwks_timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub auth: AuthSettings,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// or `None` when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Empty values count as unset
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host: IpAddr = parse_or(&var, HOST_ENV, DEFAULT_HOST.parse().ok())?;
        let port: u16 = parse_or(&var, PORT_ENV, Some(DEFAULT_PORT))?;
        let data_dir = var(DATA_DIR_ENV).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let log_format = parse_or(&var, LOG_FORMAT_ENV, Some(LogFormat::default()))?;

        let domain = var(AUTH_DOMAIN_ENV).map(|d| d.trim().trim_end_matches('/').to_string());
        let from_domain = |suffix: &str| domain.as_ref().map(|d| format!("https://{d}/{suffix}"));

        let jwks_url = var(AUTH_JWKS_URL_ENV)
            .or_else(|| from_domain(".well-known/jwks.json"))
            .ok_or(ConfigError::Missing(AUTH_DOMAIN_ENV))?;
        require_https(AUTH_JWKS_URL_ENV, &jwks_url)?;

        let issuer = var(AUTH_ISSUER_ENV)
            .or_else(|| from_domain(""))
            .ok_or(ConfigError::Missing(AUTH_DOMAIN_ENV))?;
        let audience = var(AUTH_AUDIENCE_ENV).ok_or(ConfigError::Missing(AUTH_AUDIENCE_ENV))?;

        let timeout_secs: u64 = parse_or(&var, JWKS_TIMEOUT_ENV, Some(DEFAULT_JWKS_TIMEOUT_SECS))?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: JWKS_TIMEOUT_ENV,
                value: timeout_secs.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            data_dir: PathBuf::from(data_dir),
            auth: AuthSettings {
                jwks_url,
                issuer,
                audience,
                jwks_timeout: Duration::from_secs(timeout_secs),
            },
            log_format,
        })
    }

    /// Path of the catalog database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILE)
    }
}

fn parse_or<T, F>(var: &F, name: &'static str, default: Option<T>) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => default.ok_or(ConfigError::Missing(name)),
    }
}

/// Signing keys are only trusted over TLS.
fn require_https(name: &'static str, value: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        name,
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;
    if url.scheme() != "https" {
        return Err(invalid("must use https"));
    }
    Ok(())
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gacha Catalog - Character / Card / Skill REST API
//!
//! This crate serves the content catalog of a mobile gacha game. Every
//! endpoint requires an RS256 bearer token from an external identity
//! provider carrying the endpoint's permission string.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Authentication and authorization (provider JWT + JWKS)
//! - `storage` - Embedded catalog database (redb)
//! - `models` - Records and request bodies

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod telemetry;

#[cfg(test)]
mod test_support;

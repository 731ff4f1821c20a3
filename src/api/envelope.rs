// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Success envelopes.
//!
//! Records are always returned as an array under the resource's singular key,
//! even when exactly one record is addressed:
//!
//! ```json
//! {"success": true, "card": [{"id": 1, "name": "Diva of the Birdcage", ...}]}
//! ```

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{ser::SerializeMap, Serialize, Serializer};
use utoipa::ToSchema;

/// `{"success": true, <key>: [records]}`
#[derive(Debug)]
pub struct Envelope<T> {
    key: &'static str,
    records: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn new(key: &'static str, records: Vec<T>) -> Self {
        Self { key, records }
    }

    pub fn one(key: &'static str, record: T) -> Self {
        Self::new(key, vec![record])
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("success", &true)?;
        map.serialize_entry(self.key, &self.records)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `{"success": true, "delete": <id>}`
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    pub success: bool,
    /// Id of the removed record
    pub delete: u64,
}

impl Deleted {
    pub fn new(id: u64) -> Self {
        Self {
            success: true,
            delete: id,
        }
    }
}

impl IntoResponse for Deleted {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

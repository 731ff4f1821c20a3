// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Generic CRUD handlers shared by every catalog resource.
//!
//! | Handler  | Route                   | Success                         | Failure          |
//! |----------|-------------------------|---------------------------------|------------------|
//! | `list`   | `GET <path>`            | all records by ascending id     | 404              |
//! | `get`    | `GET <path>/{id}`       | the record                      | 404              |
//! | `create` | `POST <path>`           | the stored record               | 422              |
//! | `update` | `PATCH <path>/{id}`     | the merged record               | 404 / 422        |
//! | `delete` | `DELETE <path>/{id}`    | `{"success":true,"delete":id}`  | 404 / 422        |
//!
//! Permission checks happen in the route layer before any of these run.

use axum::extract::State;
use serde::de::DeserializeOwned;

use super::envelope::{Deleted, Envelope};
use super::extract::{JsonBody, RecordId};
use crate::{
    auth::{Auth, ResourcePermissions},
    error::ApiError,
    state::AppState,
    storage::{Entity, StoreError},
};

/// Per-resource configuration binding a stored entity to its HTTP surface.
pub trait Resource: Entity {
    /// Request body of create and update.
    type Fields: DeserializeOwned + Send + 'static;

    /// Singular envelope key, e.g. `card`.
    const KEY: &'static str;
    /// Collection route, e.g. `/cards`.
    const PATH: &'static str;
    /// OpenAPI tag.
    const TAG: &'static str;
    /// Name of the record schema in the OpenAPI document.
    const SCHEMA: &'static str;
    /// Name of the request body schema in the OpenAPI document.
    const FIELDS_SCHEMA: &'static str;
    const PERMISSIONS: ResourcePermissions;

    fn from_fields(fields: Self::Fields) -> Self;
    fn merge(&mut self, fields: Self::Fields);
}

/// Map a failed write to the client-facing error.
fn write_failure<R: Resource>(action: &'static str, err: StoreError) -> ApiError {
    if err.is_not_found() {
        return ApiError::not_found();
    }
    tracing::warn!(kind = R::KIND, action, error = %err, "Write rejected");
    ApiError::unprocessable()
}

pub async fn list<R: Resource>(State(state): State<AppState>) -> Result<Envelope<R>, ApiError> {
    let records = state.store.load_all::<R>().map_err(|e| {
        tracing::error!(kind = R::KIND, error = %e, "Failed to load records");
        ApiError::not_found()
    })?;
    Ok(Envelope::new(R::KEY, records))
}

pub async fn get<R: Resource>(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<Envelope<R>, ApiError> {
    match state.store.load::<R>(id) {
        Ok(Some(record)) => Ok(Envelope::one(R::KEY, record)),
        Ok(None) => Err(ApiError::not_found()),
        Err(e) => {
            tracing::error!(kind = R::KIND, id, error = %e, "Failed to load record");
            Err(ApiError::not_found())
        }
    }
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    Auth(claims): Auth,
    JsonBody(fields): JsonBody<R::Fields>,
) -> Result<Envelope<R>, ApiError> {
    let record = state
        .store
        .insert(R::from_fields(fields))
        .map_err(|e| write_failure::<R>("create", e))?;

    tracing::info!(
        kind = R::KIND,
        id = record.id(),
        subject = %claims.subject,
        "Record created"
    );
    Ok(Envelope::one(R::KEY, record))
}

/// The body is extracted leniently so a missing id answers 404 even when the
/// body is also bad.
pub async fn update<R: Resource>(
    State(state): State<AppState>,
    Auth(claims): Auth,
    RecordId(id): RecordId,
    body: Result<JsonBody<R::Fields>, ApiError>,
) -> Result<Envelope<R>, ApiError> {
    let mut record = match state.store.load::<R>(id) {
        Ok(Some(record)) => record,
        Ok(None) => return Err(ApiError::not_found()),
        Err(e) => return Err(write_failure::<R>("update", e)),
    };
    let JsonBody(fields) = body?;

    record.merge(fields);
    state
        .store
        .update(&record)
        .map_err(|e| write_failure::<R>("update", e))?;

    tracing::info!(kind = R::KIND, id, subject = %claims.subject, "Record updated");
    Ok(Envelope::one(R::KEY, record))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    Auth(claims): Auth,
    RecordId(id): RecordId,
) -> Result<Deleted, ApiError> {
    state
        .store
        .delete::<R>(id)
        .map_err(|e| write_failure::<R>("delete", e))?;

    tracing::info!(kind = R::KIND, id, subject = %claims.subject, "Record deleted");
    Ok(Deleted::new(id))
}

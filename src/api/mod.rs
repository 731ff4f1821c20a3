// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{require_permission, PermissionGate, TokenVerifier},
    models::{Card, Character, Skill},
    state::AppState,
};

pub mod catalog;
pub mod docs;
pub mod envelope;
pub mod extract;
pub mod health;
pub mod resource;

use resource::Resource;

/// Collection and item routes of one resource, each method behind its own
/// permission gate.
fn resource_routes<R: Resource>(verifier: &Arc<TokenVerifier>) -> Router<AppState> {
    let gate = |permission: &'static str| {
        from_fn_with_state(
            PermissionGate::new(verifier.clone(), permission),
            require_permission,
        )
    };
    let permissions = R::PERMISSIONS;

    Router::new()
        .route(
            R::PATH,
            get(resource::list::<R>)
                .route_layer(gate(permissions.list))
                .merge(post(resource::create::<R>).route_layer(gate(permissions.create))),
        )
        .route(
            &format!("{}/{{id}}", R::PATH),
            get(resource::get::<R>)
                .route_layer(gate(permissions.get))
                .merge(patch(resource::update::<R>).route_layer(gate(permissions.update)))
                .merge(delete(resource::delete::<R>).route_layer(gate(permissions.delete))),
        )
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(resource_routes::<Character>(&state.verifier))
        .merge(resource_routes::<Card>(&state.verifier))
        .merge(resource_routes::<Skill>(&state.verifier))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", docs::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

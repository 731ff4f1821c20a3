// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! OpenAPI document.
//!
//! Health probes are documented with `#[utoipa::path]`. Resource operations
//! are generated from the same [`Resource`] table that builds the router, so
//! the document and the routes cannot drift apart.

use utoipa::{
    openapi::{
        content::Content,
        path::{HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn},
        request_body::RequestBodyBuilder,
        response::{Response, ResponseBuilder},
        schema::{Array, ObjectBuilder, Ref, Schema, Type},
        security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme},
        RefOr, Required,
    },
    Modify, OpenApi,
};

use super::{envelope::Deleted, health, resource::Resource};
use crate::{
    error::ErrorBody,
    models::{Card, CardFields, Character, CharacterFields, Skill, SkillFields},
};

const SECURITY_SCHEME: &str = "bearer_auth";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gacha Catalog API",
        description = "Characters, cards and skills of the gacha catalog"
    ),
    paths(health::liveness, health::readiness),
    components(
        schemas(
            Character,
            Card,
            Skill,
            CharacterFields,
            CardFields,
            SkillFields,
            Deleted,
            ErrorBody,
            health::HealthResponse,
            health::ReadyResponse,
            health::HealthChecks
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Characters", description = "Playable characters"),
        (name = "Cards", description = "Collectible cards"),
        (name = "Skills", description = "Card skills"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                SECURITY_SCHEME,
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// The complete document served at `/api-doc/openapi.json`.
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    add_resource::<Character>(&mut doc);
    add_resource::<Card>(&mut doc);
    add_resource::<Skill>(&mut doc);
    doc
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn json(schema: impl Into<RefOr<Schema>>) -> Content {
    Content::new(Some(schema))
}

/// `{"success": true, <key>: [<schema>]}`
fn envelope_schema<R: Resource>() -> RefOr<Schema> {
    ObjectBuilder::new()
        .property("success", ObjectBuilder::new().schema_type(Type::Boolean))
        .required("success")
        .property(
            R::KEY,
            RefOr::T(Schema::Array(Array::new(schema_ref(R::SCHEMA)))),
        )
        .required(R::KEY)
        .into()
}

fn operation<R: Resource>(
    summary: String,
    permission: &str,
    success: RefOr<Schema>,
) -> OperationBuilder {
    OperationBuilder::new()
        .tag(R::TAG)
        .summary(Some(summary))
        .description(Some(format!("Requires the `{permission}` permission.")))
        .security(SecurityRequirement::new(
            SECURITY_SCHEME,
            Vec::<String>::new(),
        ))
        .response(
            "200",
            ResponseBuilder::new()
                .description("Success")
                .content("application/json", json(success))
                .build(),
        )
        .response("401", error_response("Missing, invalid or insufficient token"))
}

fn error_response(description: &str) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content("application/json", json(schema_ref("ErrorBody")))
        .build()
}

fn with_id(builder: OperationBuilder, kind: &str) -> OperationBuilder {
    builder
        .parameter(
            ParameterBuilder::new()
                .name("id")
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(format!("Identifier of the {kind}")))
                .schema(Some(ObjectBuilder::new().schema_type(Type::Integer)))
                .build(),
        )
        .response("404", error_response("Resource not found"))
}

fn with_body<R: Resource>(builder: OperationBuilder) -> OperationBuilder {
    builder
        .request_body(Some(
            RequestBodyBuilder::new()
                .content("application/json", json(schema_ref(R::FIELDS_SCHEMA)))
                .required(Some(Required::True))
                .build(),
        ))
        .response("422", error_response("Unprocessable"))
}

fn add_resource<R: Resource>(doc: &mut utoipa::openapi::OpenApi) {
    let item_path = format!("{}/{{id}}", R::PATH);
    let permissions = R::PERMISSIONS;
    let kind = R::KIND;

    let list: Operation = operation::<R>(
        format!("List all {kind}s"),
        permissions.list,
        envelope_schema::<R>(),
    )
    .response("404", error_response("Records could not be loaded"))
    .build();
    let create = with_body::<R>(operation::<R>(
        format!("Create a {kind}"),
        permissions.create,
        envelope_schema::<R>(),
    ))
    .build();
    let get = with_id(
        operation::<R>(format!("Get a {kind}"), permissions.get, envelope_schema::<R>()),
        kind,
    )
    .build();
    let update = with_body::<R>(with_id(
        operation::<R>(
            format!("Update a {kind}"),
            permissions.update,
            envelope_schema::<R>(),
        ),
        kind,
    ))
    .build();
    let delete = with_id(
        operation::<R>(
            format!("Delete a {kind}"),
            permissions.delete,
            schema_ref("Deleted"),
        ),
        kind,
    )
    .response("422", error_response("Still referenced"))
    .build();

    doc.paths.add_path_operation(R::PATH, vec![HttpMethod::Get], list);
    doc.paths.add_path_operation(R::PATH, vec![HttpMethod::Post], create);
    doc.paths.add_path_operation(&item_path, vec![HttpMethod::Get], get);
    doc.paths.add_path_operation(&item_path, vec![HttpMethod::Patch], update);
    doc.paths.add_path_operation(&item_path, vec![HttpMethod::Delete], delete);
}

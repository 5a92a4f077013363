// src/handlers/resources.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use uuid::Uuid;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validate_not_negative,
    models::resources::{Resource, ResourceType},
};

// ---
// Payload: CreateResource
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateResourcePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub resource_type: ResourceType,

    #[validate(custom(function = "validate_not_negative"))]
    pub rate_per_hour: Decimal,
}

// ---
// Payload: UpdateResource (campos omitidos ficam como estão)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResourcePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub rate_per_hour: Option<Decimal>,
}

// POST /api/resources
#[utoipa::path(
    post,
    path = "/api/resources",
    tag = "Recursos",
    request_body = CreateResourcePayload,
    responses(
        (status = 201, description = "Recurso cadastrado", body = Resource),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_resource(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateResourcePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resource = app_state.resource_service.create_resource(
        payload.name,
        payload.resource_type,
        payload.rate_per_hour,
    );
    Ok((StatusCode::CREATED, Json(resource)))
}

// GET /api/resources
#[utoipa::path(
    get,
    path = "/api/resources",
    tag = "Recursos",
    responses(
        (status = 200, description = "Lista de recursos", body = Vec<Resource>)
    )
)]
pub async fn list_resources(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.resource_service.list_resources())
}

// GET /api/resources/{id}
#[utoipa::path(
    get,
    path = "/api/resources/{id}",
    tag = "Recursos",
    params(("id" = Uuid, Path, description = "ID do recurso")),
    responses(
        (status = 200, description = "Recurso", body = Resource),
        (status = 404, description = "Recurso não encontrado")
    )
)]
pub async fn get_resource(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let resource = app_state.resource_service.get_resource(id)?;
    Ok(Json(resource))
}

// PUT /api/resources/{id}
#[utoipa::path(
    put,
    path = "/api/resources/{id}",
    tag = "Recursos",
    params(("id" = Uuid, Path, description = "ID do recurso")),
    request_body = UpdateResourcePayload,
    responses(
        (status = 200, description = "Recurso atualizado (sessões abertas mantêm a tarifa congelada)", body = Resource),
        (status = 404, description = "Recurso não encontrado")
    )
)]
pub async fn update_resource(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateResourcePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let resource =
        app_state
            .resource_service
            .update_resource(id, payload.name, payload.rate_per_hour)?;
    Ok(Json(resource))
}

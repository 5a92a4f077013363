// src/handlers/sessions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{billing::Invoice, sessions::Session},
};

// ---
// Payload: StartSession
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionPayload {
    pub customer_id: Uuid,
    pub resource_id: Uuid,
}

// ---
// Payload: AddConsumption
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddConsumptionPayload {
    pub item_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: u32,
}

// ---
// Payload: UpdateConsumption
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConsumptionPayload {
    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: u32,
}

// POST /api/sessions
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "Sessões",
    request_body = StartSessionPayload,
    responses(
        (status = 201, description = "Sessão aberta", body = Session),
        (status = 404, description = "Cliente ou recurso não encontrado"),
        (status = 409, description = "Recurso ocupado ou cliente já em sessão")
    )
)]
pub async fn start_session(
    State(app_state): State<AppState>,
    Json(payload): Json<StartSessionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .session_service
        .start_session(payload.customer_id, payload.resource_id)?;
    Ok((StatusCode::CREATED, Json(session)))
}

// GET /api/sessions
#[utoipa::path(
    get,
    path = "/api/sessions",
    tag = "Sessões",
    responses(
        (status = 200, description = "Sessões ativas", body = Vec<Session>)
    )
)]
pub async fn list_sessions(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.session_service.list_active())
}

// POST /api/sessions/{id}/consumptions
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/consumptions",
    tag = "Sessões",
    params(("id" = Uuid, Path, description = "ID da sessão")),
    request_body = AddConsumptionPayload,
    responses(
        (status = 200, description = "Consumo lançado", body = Session),
        (status = 404, description = "Sessão ou item não encontrado"),
        (status = 409, description = "Estoque insuficiente")
    )
)]
pub async fn add_consumption(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddConsumptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session =
        app_state
            .session_service
            .add_consumption(id, payload.item_id, payload.quantity)?;
    Ok(Json(session))
}

// PUT /api/sessions/{id}/consumptions/{consumption_id}
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/consumptions/{consumption_id}",
    tag = "Sessões",
    params(
        ("id" = Uuid, Path, description = "ID da sessão"),
        ("consumption_id" = Uuid, Path, description = "ID do consumo")
    ),
    request_body = UpdateConsumptionPayload,
    responses(
        (status = 200, description = "Consumo ajustado", body = Session),
        (status = 404, description = "Sessão ou consumo não encontrado"),
        (status = 409, description = "Estoque insuficiente")
    )
)]
pub async fn update_consumption(
    State(app_state): State<AppState>,
    Path((id, consumption_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateConsumptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let session =
        app_state
            .session_service
            .update_consumption(id, consumption_id, payload.quantity)?;
    Ok(Json(session))
}

// DELETE /api/sessions/{id}/consumptions/{consumption_id}
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}/consumptions/{consumption_id}",
    tag = "Sessões",
    params(
        ("id" = Uuid, Path, description = "ID da sessão"),
        ("consumption_id" = Uuid, Path, description = "ID do consumo")
    ),
    responses(
        (status = 200, description = "Consumo removido, estoque devolvido", body = Session),
        (status = 404, description = "Sessão ou consumo não encontrado")
    )
)]
pub async fn remove_consumption(
    State(app_state): State<AppState>,
    Path((id, consumption_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    let session = app_state
        .session_service
        .remove_consumption(id, consumption_id)?;
    Ok(Json(session))
}

// POST /api/sessions/{id}/end
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/end",
    tag = "Sessões",
    params(("id" = Uuid, Path, description = "ID da sessão")),
    responses(
        (status = 200, description = "Sessão encerrada, fatura emitida", body = Invoice),
        (status = 404, description = "Sessão não encontrada ou já encerrada")
    )
)]
pub async fn end_session(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.session_service.end_session(id)?;
    Ok(Json(invoice))
}

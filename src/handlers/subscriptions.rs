// src/handlers/subscriptions.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::subscriptions::Subscription};

// ---
// Payload: CreateSubscription
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionPayload {
    pub customer_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2026-08-31")]
    pub end_date: NaiveDate,
}

// POST /api/crm/subscriptions
#[utoipa::path(
    post,
    path = "/api/crm/subscriptions",
    tag = "CRM",
    request_body = CreateSubscriptionPayload,
    responses(
        (status = 201, description = "Assinatura criada", body = Subscription),
        (status = 404, description = "Cliente não encontrado"),
        (status = 409, description = "Cliente já tem assinatura ativa no período")
    )
)]
pub async fn create_subscription(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSubscriptionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let subscription = app_state.crm_service.create_subscription(
        payload.customer_id,
        payload.start_date,
        payload.end_date,
    )?;
    Ok((StatusCode::CREATED, Json(subscription)))
}

// GET /api/crm/subscriptions
#[utoipa::path(
    get,
    path = "/api/crm/subscriptions",
    tag = "CRM",
    responses(
        (status = 200, description = "Lista de assinaturas", body = Vec<Subscription>)
    )
)]
pub async fn list_subscriptions(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.crm_service.list_subscriptions())
}

// POST /api/crm/subscriptions/{id}/deactivate
#[utoipa::path(
    post,
    path = "/api/crm/subscriptions/{id}/deactivate",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID da assinatura")),
    responses(
        (status = 200, description = "Assinatura desativada", body = Subscription),
        (status = 404, description = "Assinatura não encontrada")
    )
)]
pub async fn deactivate_subscription(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let subscription = app_state.crm_service.deactivate_subscription(id)?;
    Ok(Json(subscription))
}

// POST /api/crm/subscriptions/{id}/reactivate
#[utoipa::path(
    post,
    path = "/api/crm/subscriptions/{id}/reactivate",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID da assinatura")),
    responses(
        (status = 200, description = "Assinatura religada", body = Subscription),
        (status = 404, description = "Assinatura não encontrada"),
        (status = 409, description = "Outra assinatura ativa ocupa a janela")
    )
)]
pub async fn reactivate_subscription(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let subscription = app_state.crm_service.reactivate_subscription(id)?;
    Ok(Json(subscription))
}

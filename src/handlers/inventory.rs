// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, handlers::validate_not_negative,
    models::inventory::InventoryItem,
};

// ---
// Payload: CreateItem
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,

    pub quantity: u32,

    // Sem o campo no JSON, assume 0 (sem alerta de estoque baixo).
    #[serde(default)]
    pub min_stock: u32,
}

// ---
// Payload: UpdateItem (campos omitidos ficam como estão; saldo não passa
// por aqui — recontagem é o endpoint de ajuste)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Option<Decimal>,

    pub min_stock: Option<u32>,
}

// ---
// Payload: AdjustStock
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    // Delta positivo (entrada) ou negativo (perda/recontagem).
    pub delta: i64,
}

// POST /api/inventory/items
#[utoipa::path(
    post,
    path = "/api/inventory/items",
    tag = "Estoque",
    request_body = CreateItemPayload,
    responses(
        (status = 201, description = "Item cadastrado", body = InventoryItem),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_item(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.inventory_service.create_item(
        payload.name,
        payload.price,
        payload.quantity,
        payload.min_stock,
    );
    Ok((StatusCode::CREATED, Json(item)))
}

// GET /api/inventory/items
#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Estoque",
    responses(
        (status = 200, description = "Lista de itens", body = Vec<InventoryItem>)
    )
)]
pub async fn list_items(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.inventory_service.list_items())
}

// PUT /api/inventory/items/{id}
#[utoipa::path(
    put,
    path = "/api/inventory/items/{id}",
    tag = "Estoque",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = UpdateItemPayload,
    responses(
        (status = 200, description = "Item atualizado (consumos já lançados mantêm o preço congelado)", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn update_item(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let item = app_state.inventory_service.update_item(
        id,
        payload.name,
        payload.price,
        payload.min_stock,
    )?;
    Ok(Json(item))
}

// POST /api/inventory/items/{id}/adjust
#[utoipa::path(
    post,
    path = "/api/inventory/items/{id}/adjust",
    tag = "Estoque",
    params(("id" = Uuid, Path, description = "ID do item")),
    request_body = AdjustStockPayload,
    responses(
        (status = 200, description = "Saldo ajustado", body = InventoryItem),
        (status = 404, description = "Item não encontrado")
    )
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = app_state.inventory_service.adjust_quantity(id, payload.delta)?;
    Ok(Json(item))
}

// GET /api/inventory/low-stock
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    tag = "Estoque",
    responses(
        (status = 200, description = "Itens abaixo do estoque mínimo", body = Vec<InventoryItem>)
    )
)]
pub async fn low_stock(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.inventory_service.low_stock())
}

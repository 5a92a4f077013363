// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState, models::crm::Customer};

// ---
// Payload: CreateCustomer
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub phone: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

// ---
// Payload: UpdateCustomer (campos omitidos ficam como estão)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: Option<String>,

    pub phone: Option<String>,

    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBalanceResponse {
    pub customer_id: Uuid,
    pub balance: Decimal,
}

// POST /api/crm/customers
#[utoipa::path(
    post,
    path = "/api/crm/customers",
    tag = "CRM",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = Customer),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer =
        app_state
            .crm_service
            .create_customer(payload.name, payload.phone, payload.email);
    Ok((StatusCode::CREATED, Json(customer)))
}

// GET /api/crm/customers
#[utoipa::path(
    get,
    path = "/api/crm/customers",
    tag = "CRM",
    responses(
        (status = 200, description = "Lista de clientes", body = Vec<Customer>)
    )
)]
pub async fn list_customers(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.crm_service.list_customers())
}

// GET /api/crm/customers/{id}
#[utoipa::path(
    get,
    path = "/api/crm/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.crm_service.get_customer(id)?;
    Ok(Json(customer))
}

// PUT /api/crm/customers/{id}
#[utoipa::path(
    put,
    path = "/api/crm/customers/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer =
        app_state
            .crm_service
            .update_customer(id, payload.name, payload.phone, payload.email)?;
    Ok(Json(customer))
}

// GET /api/crm/customers/{id}/balance
#[utoipa::path(
    get,
    path = "/api/crm/customers/{id}/balance",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do cliente")),
    responses(
        (status = 200, description = "Saldo devedor do cliente", body = CustomerBalanceResponse),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_customer_balance(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let balance = app_state.payment_service.balance(id)?;
    Ok(Json(CustomerBalanceResponse {
        customer_id: id,
        balance,
    }))
}

// src/handlers/billing.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validate_not_negative,
    models::billing::{Invoice, PaymentMethod},
    services::billing_service::ManualLine,
};

// ---
// Payload: CreateInvoice (cobrança manual, sem sessão)
// ---
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLinePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: u32,

    #[validate(custom(function = "validate_not_negative"))]
    pub rate: Decimal,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub customer_id: Uuid,

    #[validate(length(min = 1, message = "A fatura precisa de ao menos uma linha."), nested)]
    pub line_items: Vec<InvoiceLinePayload>,

    #[serde(default)]
    #[validate(custom(function = "validate_not_negative"))]
    pub discount: Decimal,

    #[schema(value_type = Option<String>, format = Date)]
    pub due_date: Option<NaiveDate>,
}

// ---
// Payload: RecordPayment
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentPayload {
    pub amount: Decimal,

    pub method: PaymentMethod,

    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,

    pub notes: Option<String>,
}

// ---
// Payload: BulkPayment
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkPaymentPayload {
    #[validate(length(min = 1, message = "Informe ao menos uma fatura."))]
    pub invoice_ids: Vec<Uuid>,

    pub total_amount: Decimal,

    pub method: PaymentMethod,

    #[schema(value_type = Option<String>, format = Date)]
    pub date: Option<NaiveDate>,

    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InvoiceListQuery {
    // Filtra as faturas de um cliente específico.
    pub customer_id: Option<Uuid>,
}

// POST /api/billing/invoices
#[utoipa::path(
    post,
    path = "/api/billing/invoices",
    tag = "Faturamento",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Fatura emitida", body = Invoice),
        (status = 404, description = "Cliente não encontrado"),
        (status = 422, description = "Desconto inválido")
    )
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lines = payload
        .line_items
        .into_iter()
        .map(|l| ManualLine {
            description: l.description,
            quantity: l.quantity,
            rate: l.rate,
        })
        .collect();
    let invoice = app_state.billing_service.create_manual_invoice(
        payload.customer_id,
        lines,
        payload.discount,
        payload.due_date,
    )?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/billing/invoices
#[utoipa::path(
    get,
    path = "/api/billing/invoices",
    tag = "Faturamento",
    params(InvoiceListQuery),
    responses(
        (status = 200, description = "Lista de faturas", body = Vec<Invoice>)
    )
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    Query(query): Query<InvoiceListQuery>,
) -> impl IntoResponse {
    Json(app_state.billing_service.list_invoices(query.customer_id))
}

// GET /api/billing/invoices/{id}
#[utoipa::path(
    get,
    path = "/api/billing/invoices/{id}",
    tag = "Faturamento",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura", body = Invoice),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.get_invoice(id)?;
    Ok(Json(invoice))
}

// POST /api/billing/invoices/{id}/payments
#[utoipa::path(
    post,
    path = "/api/billing/invoices/{id}/payments",
    tag = "Faturamento",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    request_body = RecordPaymentPayload,
    responses(
        (status = 200, description = "Pagamento registrado", body = Invoice),
        (status = 404, description = "Fatura não encontrada"),
        (status = 422, description = "Valor inválido ou acima do saldo devedor")
    )
)]
pub async fn record_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.payment_service.record_payment(
        id,
        payload.amount,
        payload.method,
        payload.date,
        payload.notes,
    )?;
    Ok(Json(invoice))
}

// POST /api/billing/payments/bulk
#[utoipa::path(
    post,
    path = "/api/billing/payments/bulk",
    tag = "Faturamento",
    request_body = BulkPaymentPayload,
    responses(
        (status = 200, description = "Pagamento distribuído entre as faturas", body = Vec<Invoice>),
        (status = 404, description = "Alguma fatura não encontrada"),
        (status = 422, description = "Valor inválido ou acima da dívida total")
    )
)]
pub async fn record_bulk_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<BulkPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoices = app_state.payment_service.record_bulk_payment(
        &payload.invoice_ids,
        payload.total_amount,
        payload.method,
        payload.date,
        payload.notes,
    )?;
    Ok(Json(invoices))
}

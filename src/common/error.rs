// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// As variantes seguem a taxonomia do motor: validação, não-encontrado,
// conflito de estado e regra de negócio. Toda operação que falha com um
// desses erros NÃO altera nenhum agregado.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Não encontrado ---
    #[error("Cliente não encontrado")]
    CustomerNotFound,

    #[error("Recurso não encontrado")]
    ResourceNotFound,

    #[error("Item de estoque não encontrado")]
    ItemNotFound,

    #[error("Sessão não encontrada ou já encerrada")]
    SessionNotActive,

    #[error("Consumo não encontrado na sessão")]
    ConsumptionNotFound,

    #[error("Fatura não encontrada")]
    InvoiceNotFound,

    #[error("Assinatura não encontrada")]
    SubscriptionNotFound,

    // --- Conflitos de estado ---
    #[error("Recurso indisponível")]
    ResourceUnavailable,

    #[error("Recurso já está livre")]
    ResourceNotAllocated,

    #[error("Cliente já possui uma sessão ativa")]
    CustomerAlreadyInSession,

    #[error("Cliente já possui uma assinatura ativa")]
    SubscriptionAlreadyActive,

    #[error("Estoque insuficiente")]
    InsufficientStock,

    // --- Regras de negócio (financeiro) ---
    #[error("Valor de pagamento inválido")]
    InvalidAmount,

    #[error("Pagamento excede o saldo devedor da fatura")]
    PaymentExceedsBalance,

    #[error("Valor total excede a dívida em aberto das faturas selecionadas")]
    TotalExceedsDebt,

    #[error("Desconto inválido")]
    InvalidDiscount,

    // Variante genérica para qualquer outro erro inesperado.
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retornamos todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::CustomerNotFound
            | AppError::ResourceNotFound
            | AppError::ItemNotFound
            | AppError::SessionNotActive
            | AppError::ConsumptionNotFound
            | AppError::InvoiceNotFound
            | AppError::SubscriptionNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::ResourceUnavailable
            | AppError::ResourceNotAllocated
            | AppError::CustomerAlreadyInSession
            | AppError::SubscriptionAlreadyActive
            | AppError::InsufficientStock => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidAmount
            | AppError::PaymentExceedsBalance
            | AppError::TotalExceedsDebt
            | AppError::InvalidDiscount => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),

            // O `tracing` loga a mensagem detalhada que `thiserror` nos deu.
            AppError::InternalServerError(ref e) => {
                tracing::error!("Erro Interno do Servidor: {e:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

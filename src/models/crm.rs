// src/models/crm.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- CLIENTE ---
// O saldo NÃO fica aqui: ele é derivado das faturas (total - pago),
// recalculado sob demanda pelo serviço de pagamentos.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Ahmed Hassan")]
    pub name: String,

    #[schema(example = "+20 100 123 4567")]
    pub phone: Option<String>,

    #[schema(example = "ahmed@example.com")]
    pub email: Option<String>,

    pub created_at: DateTime<Utc>,
}

// src/models/subscriptions.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- ASSINATURA ---
// Consultada UMA única vez, na abertura da sessão, para decidir o
// `is_subscribed`. Expirar ou desativar no meio da sessão não muda a
// cobrança daquela sessão.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: Uuid,

    pub customer_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-08-01")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2026-08-31")]
    pub end_date: NaiveDate,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

impl Subscription {
    // Ativa "em tal data": flag ligada e dentro da janela (inclusiva).
    pub fn covers(&self, on: NaiveDate) -> bool {
        self.is_active && self.start_date <= on && on <= self.end_date
    }
}

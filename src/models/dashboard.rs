// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- ATIVIDADE RECENTE ---
// Feed informativo dos últimos eventos do motor (limitado a 50 entradas).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    CustomerNew,
    SubscriptionNew,
    SessionStart,
    SessionEnd,
    InventoryAdd,
    InvoiceCreated,
    InvoicePaid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,

    #[serde(rename = "type")]
    pub kind: ActivityKind,

    #[schema(example = "Ahmed Hassan iniciou sessão em Sala de Reunião 1")]
    pub description: String,

    pub timestamp: DateTime<Utc>,
}

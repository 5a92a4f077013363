// src/models/resources.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Seat,
    Desk,
    Room,
}

// --- RECURSO (assento / mesa / sala) ---
// Invariante: `available == false` se e somente se existe exatamente
// uma sessão ativa apontando para este recurso.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,

    #[schema(example = "Sala de Reunião 1")]
    pub name: String,

    pub resource_type: ResourceType,

    #[schema(example = "100.00")]
    pub rate_per_hour: Decimal,

    pub available: bool,

    pub created_at: DateTime<Utc>,
}

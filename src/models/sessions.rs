// src/models/sessions.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- CONSUMO ---
// `unit_price` é um snapshot do preço de catálogo no momento do consumo.
// É um valor copiado, nunca uma referência ao catálogo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub id: Uuid,

    pub item_id: Uuid,

    #[schema(example = "Café Espresso")]
    pub item_name: String,

    #[schema(example = 2)]
    pub quantity: u32,

    #[schema(example = "15.00")]
    pub unit_price: Decimal,

    pub added_at: DateTime<Utc>,
}

impl Consumption {
    pub fn amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

// --- SESSÃO ATIVA ---
// Vive de start_session até end_session; no encerramento vira fatura e
// sai do conjunto ativo (nunca é mutada depois disso).
//
// `resource_rate` e `is_subscribed` são congelados na abertura: mudanças
// de tarifa ou de assinatura no meio da sessão não afetam a cobrança.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: Uuid,

    pub customer_id: Uuid,

    #[schema(example = "Ahmed Hassan")]
    pub customer_name: String,

    pub resource_id: Uuid,

    #[schema(example = "Sala de Reunião 1")]
    pub resource_name: String,

    #[schema(example = "100.00")]
    pub resource_rate: Decimal,

    pub started_at: DateTime<Utc>,

    pub is_subscribed: bool,

    pub consumptions: Vec<Consumption>,

    #[schema(example = "30.00")]
    pub inventory_total: Decimal,
}

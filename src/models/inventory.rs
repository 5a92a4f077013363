// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use utoipa::ToSchema;

// --- ITEM DE ESTOQUE ---
// `price` é o preço de catálogo ATUAL. As sessões congelam o preço no
// momento do consumo (snapshot), então mudar o preço aqui nunca altera
// consumos já registrados.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,

    #[schema(example = "Café Espresso")]
    pub name: String,

    #[schema(example = "15.00")]
    pub price: Decimal,

    #[schema(example = 40)]
    pub quantity: u32,

    // Abaixo disso (e acima de zero) o item entra na lista de estoque baixo.
    #[schema(example = 10)]
    pub min_stock: u32,

    pub created_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.quantity > 0 && self.quantity <= self.min_stock
    }
}

// src/services/inventory_service.rs

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    models::{dashboard::ActivityKind, inventory::InventoryItem},
    store::Store,
};

// Catálogo de consumíveis: cadastro, ajuste manual de saldo e alerta de
// estoque baixo. A baixa por consumo de sessão fica no SessionService.
#[derive(Clone)]
pub struct InventoryService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl InventoryService {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn create_item(
        &self,
        name: String,
        price: Decimal,
        quantity: u32,
        min_stock: u32,
    ) -> InventoryItem {
        let now = self.clock.now();
        let item = InventoryItem {
            id: Uuid::new_v4(),
            name: name.clone(),
            price,
            quantity,
            min_stock,
            created_at: now,
        };

        let mut state = self.store.write();
        state.inventory.insert(item.clone());
        state.activity.record(
            ActivityKind::InventoryAdd,
            format!("Item {name} adicionado ao estoque"),
            now,
        );
        item
    }

    // Atualiza o cadastro do item. Preço novo vale só para consumos
    // futuros: os já lançados mantêm o snapshot. O saldo não passa por
    // aqui — recontagem é `adjust_quantity`.
    pub fn update_item(
        &self,
        id: Uuid,
        name: Option<String>,
        price: Option<Decimal>,
        min_stock: Option<u32>,
    ) -> Result<InventoryItem, AppError> {
        let mut state = self.store.write();
        let item = state.inventory.get_mut(id)?;
        if let Some(name) = name {
            item.name = name;
        }
        if let Some(price) = price {
            item.price = price;
        }
        if let Some(min_stock) = min_stock {
            item.min_stock = min_stock;
        }
        Ok(item.clone())
    }

    // Recontagem ou perda: delta positivo ou negativo, saldo nunca fica
    // abaixo de zero.
    pub fn adjust_quantity(&self, id: Uuid, delta: i64) -> Result<InventoryItem, AppError> {
        let mut state = self.store.write();
        Ok(state.inventory.adjust(id, delta)?.clone())
    }

    pub fn low_stock(&self) -> Vec<InventoryItem> {
        self.store.read().inventory.low_stock()
    }

    pub fn list_items(&self) -> Vec<InventoryItem> {
        self.store.read().inventory.list()
    }
}

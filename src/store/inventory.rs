// src/store/inventory.rs

use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::inventory::InventoryItem};

// Catálogo de itens consumíveis: preço de catálogo + saldo de estoque.
#[derive(Default)]
pub struct InventoryCatalog {
    items: HashMap<Uuid, InventoryItem>,
}

impl InventoryCatalog {
    pub fn insert(&mut self, item: InventoryItem) {
        self.items.insert(item.id, item);
    }

    pub fn get(&self, id: Uuid) -> Result<&InventoryItem, AppError> {
        self.items.get(&id).ok_or(AppError::ItemNotFound)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut InventoryItem, AppError> {
        self.items.get_mut(&id).ok_or(AppError::ItemNotFound)
    }

    pub fn current_stock(&self, id: Uuid) -> Result<u32, AppError> {
        Ok(self.get(id)?.quantity)
    }

    // Verifica-e-baixa num passo único: ou o saldo cobre a quantidade e
    // o estoque é decrementado, ou nada muda. Chamado sempre sob o lock
    // de escrita do motor, então não há venda além do saldo.
    pub fn deduct(&mut self, id: Uuid, quantity: u32) -> Result<(), AppError> {
        let item = self.items.get_mut(&id).ok_or(AppError::ItemNotFound)?;
        if item.quantity < quantity {
            return Err(AppError::InsufficientStock);
        }
        item.quantity -= quantity;
        Ok(())
    }

    // Devolve estoque (edição/remoção de consumo de uma sessão ativa).
    pub fn restore(&mut self, id: Uuid, quantity: u32) -> Result<(), AppError> {
        let item = self.items.get_mut(&id).ok_or(AppError::ItemNotFound)?;
        item.quantity += quantity;
        Ok(())
    }

    // Ajuste manual de saldo (recontagem, perda). Nunca fica negativo.
    pub fn adjust(&mut self, id: Uuid, delta: i64) -> Result<&InventoryItem, AppError> {
        let item = self.items.get_mut(&id).ok_or(AppError::ItemNotFound)?;
        let new_quantity = i64::from(item.quantity) + delta;
        item.quantity = new_quantity.max(0) as u32;
        Ok(item)
    }

    pub fn low_stock(&self) -> Vec<InventoryItem> {
        let mut low: Vec<InventoryItem> = self
            .items
            .values()
            .filter(|i| i.is_low_stock())
            .cloned()
            .collect();
        low.sort_by(|a, b| a.name.cmp(&b.name));
        low
    }

    pub fn list(&self) -> Vec<InventoryItem> {
        let mut all: Vec<InventoryItem> = self.items.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn item(quantity: u32, min_stock: u32) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            name: "Café".to_string(),
            price: Decimal::new(1500, 2),
            quantity,
            min_stock,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn deduct_fails_without_touching_stock() {
        let mut catalog = InventoryCatalog::default();
        let it = item(3, 1);
        let id = it.id;
        catalog.insert(it);

        let err = catalog.deduct(id, 5).unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));
        assert_eq!(catalog.current_stock(id).unwrap(), 3);

        catalog.deduct(id, 3).unwrap();
        assert_eq!(catalog.current_stock(id).unwrap(), 0);
    }

    #[test]
    fn adjust_clamps_at_zero() {
        let mut catalog = InventoryCatalog::default();
        let it = item(4, 1);
        let id = it.id;
        catalog.insert(it);

        catalog.adjust(id, -10).unwrap();
        assert_eq!(catalog.current_stock(id).unwrap(), 0);
    }

    #[test]
    fn low_stock_excludes_zeroed_items() {
        let mut catalog = InventoryCatalog::default();
        let low = item(2, 5);
        let zero = item(0, 5);
        let ok = item(50, 5);
        let low_id = low.id;
        catalog.insert(low);
        catalog.insert(zero);
        catalog.insert(ok);

        let alerts = catalog.low_stock();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, low_id);
    }
}

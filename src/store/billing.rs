// src/store/billing.rs

use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::billing::Invoice};

// Livro de faturas: append-only (fatura nunca é apagada, trilha de
// auditoria), mutada apenas pelo registro de pagamentos.
#[derive(Default)]
pub struct InvoiceLedger {
    invoices: HashMap<Uuid, Invoice>,
    sequence: u32,
}

impl InvoiceLedger {
    // Numeração sequencial de exibição (INV-0001, INV-0002, ...).
    pub fn next_number(&mut self) -> String {
        self.sequence += 1;
        format!("INV-{:04}", self.sequence)
    }

    pub fn insert(&mut self, invoice: Invoice) {
        self.invoices.insert(invoice.id, invoice);
    }

    pub fn get(&self, id: Uuid) -> Result<&Invoice, AppError> {
        self.invoices.get(&id).ok_or(AppError::InvoiceNotFound)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Invoice, AppError> {
        self.invoices.get_mut(&id).ok_or(AppError::InvoiceNotFound)
    }

    // Visão de saldo do cliente: Σ (total - pago) das faturas dele,
    // recalculada sob demanda — nada de saldo armazenado no cadastro.
    pub fn balance_for(&self, customer_id: Uuid) -> Decimal {
        self.invoices
            .values()
            .filter(|i| i.customer_id == customer_id)
            .map(Invoice::remaining)
            .sum()
    }

    pub fn list_for_customer(&self, customer_id: Uuid) -> Vec<Invoice> {
        let mut all: Vec<Invoice> = self
            .invoices
            .values()
            .filter(|i| i.customer_id == customer_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }

    pub fn list(&self) -> Vec<Invoice> {
        let mut all: Vec<Invoice> = self.invoices.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }
}

// src/services/session_service.rs

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{clock::Clock, error::AppError},
    models::{
        billing::Invoice,
        dashboard::ActivityKind,
        sessions::{Consumption, Session},
    },
    services::BillingService,
    store::{PersistenceSink, Store},
};

// Dono do ciclo de vida das sessões: abre (alocando o recurso), registra
// consumo (baixando estoque) e encerra (liberando o recurso e emitindo a
// fatura). Cada método pega o lock de escrita UMA vez, valida tudo e só
// então muta — falha nunca deixa estado pela metade.
#[derive(Clone)]
pub struct SessionService {
    store: Store,
    billing: BillingService,
    clock: Arc<dyn Clock>,
    sink: Arc<dyn PersistenceSink>,
}

impl SessionService {
    pub fn new(
        store: Store,
        billing: BillingService,
        clock: Arc<dyn Clock>,
        sink: Arc<dyn PersistenceSink>,
    ) -> Self {
        Self {
            store,
            billing,
            clock,
            sink,
        }
    }

    // --- ABRIR SESSÃO ---
    // Congela aqui o que não pode mudar no meio da sessão: a tarifa do
    // recurso e o resultado da consulta de assinatura.
    pub fn start_session(&self, customer_id: Uuid, resource_id: Uuid) -> Result<Session, AppError> {
        let now = self.clock.now();
        let mut state = self.store.write();

        let customer_name = state.customers.get(customer_id)?.name.clone();
        if state.sessions.customer_has_session(customer_id) {
            return Err(AppError::CustomerAlreadyInSession);
        }

        let resource = state.resources.get(resource_id)?;
        if !resource.available {
            return Err(AppError::ResourceUnavailable);
        }
        let resource_name = resource.name.clone();
        let resource_rate = resource.rate_per_hour;

        // Consulta única; expiração no meio da sessão não muda a cobrança.
        let is_subscribed = state.subscriptions.has_active(customer_id, now.date_naive());

        // Validações concluídas: agora sim, mutações.
        state.resources.allocate(resource_id)?;

        let session = Session {
            id: Uuid::new_v4(),
            customer_id,
            customer_name: customer_name.clone(),
            resource_id,
            resource_name: resource_name.clone(),
            resource_rate,
            started_at: now,
            is_subscribed,
            consumptions: Vec::new(),
            inventory_total: Decimal::ZERO,
        };
        state.sessions.insert(session.clone());
        state.activity.record(
            ActivityKind::SessionStart,
            format!("{customer_name} iniciou sessão em {resource_name}"),
            now,
        );
        drop(state);

        self.sink.session_opened(&session);
        Ok(session)
    }

    // --- CONSUMO ---
    // Verificar estoque e baixar é um passo só (sob o lock de escrita):
    // não existe vender além do saldo. O preço unitário é congelado aqui.
    pub fn add_consumption(
        &self,
        session_id: Uuid,
        item_id: Uuid,
        quantity: u32,
    ) -> Result<Session, AppError> {
        if quantity == 0 {
            let mut errors = ValidationErrors::new();
            errors.add("quantity", ValidationError::new("range"));
            return Err(AppError::ValidationError(errors));
        }

        let now = self.clock.now();
        let mut state = self.store.write();

        // Sessão primeiro: o erro certo quando ela já encerrou.
        state.sessions.get(session_id)?;
        let item = state.inventory.get(item_id)?;
        let item_name = item.name.clone();
        let unit_price = item.price;

        state.inventory.deduct(item_id, quantity)?;

        let session = state.sessions.get_mut(session_id)?;
        session.consumptions.push(Consumption {
            id: Uuid::new_v4(),
            item_id,
            item_name: item_name.clone(),
            quantity,
            unit_price,
            added_at: now,
        });
        session.inventory_total += unit_price * Decimal::from(quantity);
        let snapshot = session.clone();

        state.activity.record(
            ActivityKind::InventoryAdd,
            format!(
                "{item_name} adicionado à sessão de {}",
                snapshot.customer_name
            ),
            now,
        );
        Ok(snapshot)
    }

    // Ajusta a quantidade de um consumo já lançado. O estoque recebe a
    // diferença (ou devolve); o preço continua o snapshot original.
    pub fn update_consumption(
        &self,
        session_id: Uuid,
        consumption_id: Uuid,
        new_quantity: u32,
    ) -> Result<Session, AppError> {
        if new_quantity == 0 {
            let mut errors = ValidationErrors::new();
            errors.add("quantity", ValidationError::new("range"));
            return Err(AppError::ValidationError(errors));
        }

        let mut state = self.store.write();

        let (item_id, old_quantity, unit_price) = {
            let session = state.sessions.get(session_id)?;
            let consumption = session
                .consumptions
                .iter()
                .find(|c| c.id == consumption_id)
                .ok_or(AppError::ConsumptionNotFound)?;
            (
                consumption.item_id,
                consumption.quantity,
                consumption.unit_price,
            )
        };

        if new_quantity > old_quantity {
            state.inventory.deduct(item_id, new_quantity - old_quantity)?;
        } else if new_quantity < old_quantity {
            state.inventory.restore(item_id, old_quantity - new_quantity)?;
        }

        let session = state.sessions.get_mut(session_id)?;
        if let Some(consumption) = session
            .consumptions
            .iter_mut()
            .find(|c| c.id == consumption_id)
        {
            consumption.quantity = new_quantity;
        }
        session.inventory_total +=
            unit_price * (Decimal::from(new_quantity) - Decimal::from(old_quantity));
        Ok(session.clone())
    }

    // Remove o consumo e devolve o estoque.
    pub fn remove_consumption(
        &self,
        session_id: Uuid,
        consumption_id: Uuid,
    ) -> Result<Session, AppError> {
        let mut state = self.store.write();

        let (item_id, quantity, amount) = {
            let session = state.sessions.get(session_id)?;
            let consumption = session
                .consumptions
                .iter()
                .find(|c| c.id == consumption_id)
                .ok_or(AppError::ConsumptionNotFound)?;
            (consumption.item_id, consumption.quantity, consumption.amount())
        };

        state.inventory.restore(item_id, quantity)?;

        let session = state.sessions.get_mut(session_id)?;
        session.consumptions.retain(|c| c.id != consumption_id);
        session.inventory_total -= amount;
        Ok(session.clone())
    }

    // --- ENCERRAR SESSÃO ---
    // Libera o recurso, tira a sessão do conjunto ativo e entrega o
    // resumo à fábrica de faturas — tudo na mesma transação.
    pub fn end_session(&self, session_id: Uuid) -> Result<Invoice, AppError> {
        let now = self.clock.now();
        let mut state = self.store.write();

        let resource_id = state.sessions.get(session_id)?.resource_id;
        state.resources.release(resource_id)?;
        let session = state.sessions.remove(session_id)?;

        let invoice_number = state.invoices.next_number();
        let invoice = self
            .billing
            .invoice_from_session(invoice_number, &session, now);
        state.invoices.insert(invoice.clone());

        state.activity.record(
            ActivityKind::SessionEnd,
            format!(
                "{} encerrou sessão - total {}",
                session.customer_name, invoice.total
            ),
            now,
        );
        drop(state);

        self.sink.session_closed(session.id, &invoice);
        self.sink.invoice_created(&invoice);
        Ok(invoice)
    }

    pub fn list_active(&self) -> Vec<Session> {
        self.store.read().sessions.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::billing::InvoiceStatus;
    use crate::services::test_support::TestEngine;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    #[test]
    fn start_session_allocates_resource_and_freezes_subscription() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        engine.seed_active_subscription(customer_id);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        assert!(session.is_subscribed);
        assert_eq!(session.resource_rate, dec!(100));

        // Recurso ficou ocupado; segunda sessão no mesmo recurso falha.
        let other = engine.seed_customer("Mona");
        let err = engine.sessions.start_session(other, resource_id).unwrap_err();
        assert!(matches!(err, AppError::ResourceUnavailable));
    }

    #[test]
    fn failed_start_leaves_resource_available() {
        // Falha de validação (cliente inexistente) não pode deixar o
        // recurso marcado como ocupado.
        let engine = TestEngine::new();
        let resource_id = engine.seed_resource("Sala 1", dec!(100));

        let err = engine
            .sessions
            .start_session(Uuid::new_v4(), resource_id)
            .unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound));
        assert!(engine.store.read().resources.get(resource_id).unwrap().available);
    }

    #[test]
    fn customer_cannot_hold_two_sessions() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let r1 = engine.seed_resource("Sala 1", dec!(100));
        let r2 = engine.seed_resource("Sala 2", dec!(100));

        engine.sessions.start_session(customer_id, r1).unwrap();
        let err = engine.sessions.start_session(customer_id, r2).unwrap_err();
        assert!(matches!(err, AppError::CustomerAlreadyInSession));
        // O segundo recurso continua livre.
        assert!(engine.store.read().resources.get(r2).unwrap().available);
    }

    #[test]
    fn resource_availability_matches_active_sessions() {
        // Invariante: available == false sse exatamente uma sessão ativa
        // referencia o recurso.
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Mesa 3", dec!(50));

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        {
            let state = engine.store.read();
            assert!(!state.resources.get(resource_id).unwrap().available);
            let holders: Vec<_> = state
                .sessions
                .list()
                .into_iter()
                .filter(|s| s.resource_id == resource_id)
                .collect();
            assert_eq!(holders.len(), 1);
        }

        engine.sessions.end_session(session.id).unwrap();
        let state = engine.store.read();
        assert!(state.resources.get(resource_id).unwrap().available);
        assert!(state.sessions.list().is_empty());
    }

    #[test]
    fn consumption_snapshots_price_and_deducts_stock() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        let item_id = engine.seed_item("Café", dec!(15), 10);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        let session = engine.sessions.add_consumption(session.id, item_id, 2).unwrap();
        assert_eq!(session.inventory_total, dec!(30));
        assert_eq!(engine.store.read().inventory.current_stock(item_id).unwrap(), 8);

        // Subir o preço de catálogo NÃO mexe no consumo já lançado.
        engine
            .inventory
            .update_item(item_id, None, Some(dec!(99)), None)
            .unwrap();
        let ended = engine.sessions.end_session(session.id).unwrap();
        let consumption_line = &ended.line_items[0];
        assert_eq!(consumption_line.rate, dec!(15));
        assert_eq!(consumption_line.amount, dec!(30));
    }

    #[test]
    fn rate_update_does_not_affect_open_session() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        engine
            .resources
            .update_resource(resource_id, None, Some(dec!(500)))
            .unwrap();

        // A sessão aberta cobra a tarifa congelada; só a próxima pega a nova.
        engine.clock.advance(Duration::minutes(60));
        let invoice = engine.sessions.end_session(session.id).unwrap();
        assert_eq!(invoice.total, dec!(100));

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        assert_eq!(session.resource_rate, dec!(500));
    }

    #[test]
    fn oversell_fails_and_stock_is_untouched() {
        // Cenário C: quantidade maior que o saldo falha sem mexer em nada.
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        let item_id = engine.seed_item("Café", dec!(15), 3);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        let err = engine
            .sessions
            .add_consumption(session.id, item_id, 5)
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));

        let state = engine.store.read();
        assert_eq!(state.inventory.current_stock(item_id).unwrap(), 3);
        assert!(state.sessions.get(session.id).unwrap().consumptions.is_empty());
    }

    #[test]
    fn update_and_remove_consumption_rebalance_stock() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        let item_id = engine.seed_item("Café", dec!(15), 10);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        let session = engine.sessions.add_consumption(session.id, item_id, 2).unwrap();
        let consumption_id = session.consumptions[0].id;

        // 2 -> 5: baixa mais 3 do estoque
        let session = engine
            .sessions
            .update_consumption(session.id, consumption_id, 5)
            .unwrap();
        assert_eq!(session.inventory_total, dec!(75));
        assert_eq!(engine.store.read().inventory.current_stock(item_id).unwrap(), 5);

        // aumentar além do saldo falha sem alterar o consumo
        let err = engine
            .sessions
            .update_consumption(session.id, consumption_id, 11)
            .unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock));
        assert_eq!(
            engine.store.read().sessions.get(session.id).unwrap().consumptions[0].quantity,
            5
        );

        // remover devolve tudo
        let session = engine
            .sessions
            .remove_consumption(session.id, consumption_id)
            .unwrap();
        assert_eq!(session.inventory_total, Decimal::ZERO);
        assert_eq!(engine.store.read().inventory.current_stock(item_id).unwrap(), 10);
    }

    #[test]
    fn end_session_emits_invoice_with_time_and_consumptions() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        let item_id = engine.seed_item("Café", dec!(15), 10);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        engine.sessions.add_consumption(session.id, item_id, 2).unwrap();
        engine.clock.advance(Duration::minutes(90));

        let invoice = engine.sessions.end_session(session.id).unwrap();
        assert_eq!(invoice.invoice_number, "INV-0001");
        assert_eq!(invoice.line_items.len(), 2);
        assert_eq!(invoice.line_items[0].amount, dec!(150));
        assert_eq!(invoice.total, dec!(180));
        assert_eq!(invoice.status, InvoiceStatus::Unpaid);
        assert_eq!(invoice.session_id, Some(session.id));

        // Sessão saiu do conjunto ativo: encerrar de novo é erro.
        let err = engine.sessions.end_session(session.id).unwrap_err();
        assert!(matches!(err, AppError::SessionNotActive));
    }

    #[test]
    fn subscription_expiring_mid_session_does_not_change_billing() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let resource_id = engine.seed_resource("Sala 1", dec!(100));
        let sub_id = engine.seed_active_subscription(customer_id);

        let session = engine.sessions.start_session(customer_id, resource_id).unwrap();
        assert!(session.is_subscribed);

        // Desativa a assinatura com a sessão aberta.
        engine
            .store
            .write()
            .subscriptions
            .deactivate(sub_id)
            .unwrap();
        engine.clock.advance(Duration::minutes(120));

        let invoice = engine.sessions.end_session(session.id).unwrap();
        // is_subscribed foi congelado na abertura: tempo continua zerado.
        assert_eq!(invoice.total, Decimal::ZERO);
    }
}

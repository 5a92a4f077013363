// src/services/crm_service.rs

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::{clock::Clock, error::AppError},
    models::{crm::Customer, dashboard::ActivityKind, subscriptions::Subscription},
    store::Store,
};

// Cadastro de clientes e assinaturas.
#[derive(Clone)]
pub struct CrmService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl CrmService {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn create_customer(
        &self,
        name: String,
        phone: Option<String>,
        email: Option<String>,
    ) -> Customer {
        let now = self.clock.now();
        let customer = Customer {
            id: Uuid::new_v4(),
            name: name.clone(),
            phone,
            email,
            created_at: now,
        };

        let mut state = self.store.write();
        state.customers.insert(customer.clone());
        state.activity.record(
            ActivityKind::CustomerNew,
            format!("Cliente {name} cadastrado"),
            now,
        );
        customer
    }

    pub fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        Ok(self.store.read().customers.get(id)?.clone())
    }

    // Campos omitidos ficam como estão. O nome novo só vale para
    // sessões e faturas futuras: snapshots já gravados não mudam.
    pub fn update_customer(
        &self,
        id: Uuid,
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    ) -> Result<Customer, AppError> {
        let mut state = self.store.write();
        let customer = state.customers.get_mut(id)?;
        if let Some(name) = name {
            customer.name = name;
        }
        if let Some(phone) = phone {
            customer.phone = Some(phone);
        }
        if let Some(email) = email {
            customer.email = Some(email);
        }
        Ok(customer.clone())
    }

    pub fn list_customers(&self) -> Vec<Customer> {
        self.store.read().customers.list()
    }

    // --- ASSINATURAS ---
    // Uma assinatura ativa por cliente por período: janelas que se cruzam
    // são rejeitadas.
    pub fn create_subscription(
        &self,
        customer_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Subscription, AppError> {
        if end_date < start_date {
            let mut errors = ValidationErrors::new();
            errors.add("endDate", ValidationError::new("range"));
            return Err(AppError::ValidationError(errors));
        }

        let now = self.clock.now();
        let mut state = self.store.write();

        let customer_name = state.customers.get(customer_id)?.name.clone();
        if state
            .subscriptions
            .overlaps_active(customer_id, start_date, end_date)
        {
            return Err(AppError::SubscriptionAlreadyActive);
        }

        let subscription = Subscription {
            id: Uuid::new_v4(),
            customer_id,
            start_date,
            end_date,
            is_active: true,
            created_at: now,
        };
        state.subscriptions.insert(subscription.clone());
        state.activity.record(
            ActivityKind::SubscriptionNew,
            format!("Assinatura criada para {customer_name}"),
            now,
        );
        Ok(subscription)
    }

    pub fn deactivate_subscription(&self, id: Uuid) -> Result<Subscription, AppError> {
        let mut state = self.store.write();
        Ok(state.subscriptions.deactivate(id)?.clone())
    }

    // Religar passa pela mesma regra da criação: se outra assinatura
    // ativa do cliente ocupou a janela nesse meio-tempo, rejeita.
    pub fn reactivate_subscription(&self, id: Uuid) -> Result<Subscription, AppError> {
        let mut state = self.store.write();

        let (customer_id, start_date, end_date) = {
            let sub = state.subscriptions.get(id)?;
            (sub.customer_id, sub.start_date, sub.end_date)
        };
        if state
            .subscriptions
            .overlaps_active(customer_id, start_date, end_date)
        {
            return Err(AppError::SubscriptionAlreadyActive);
        }
        Ok(state.subscriptions.reactivate(id)?.clone())
    }

    pub fn list_subscriptions(&self) -> Vec<Subscription> {
        self.store.read().subscriptions.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::TestEngine;
    use chrono::Days;

    #[test]
    fn overlapping_active_subscription_is_rejected() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let today = engine.clock.now().date_naive();

        engine
            .crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap();
        let err = engine
            .crm
            .create_subscription(customer_id, today + Days::new(10), today + Days::new(40))
            .unwrap_err();
        assert!(matches!(err, AppError::SubscriptionAlreadyActive));

        // Janela disjunta passa.
        engine
            .crm
            .create_subscription(customer_id, today + Days::new(31), today + Days::new(60))
            .unwrap();
    }

    #[test]
    fn deactivated_subscription_frees_the_window() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let today = engine.clock.now().date_naive();

        let sub = engine
            .crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap();
        let sub = engine.crm.deactivate_subscription(sub.id).unwrap();
        assert!(!sub.is_active);

        engine
            .crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap();
    }

    #[test]
    fn update_customer_keeps_omitted_fields() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        engine
            .crm
            .update_customer(customer_id, None, Some("+20 100 123 4567".to_string()), None)
            .unwrap();

        let customer = engine.crm.get_customer(customer_id).unwrap();
        assert_eq!(customer.name, "Ahmed");
        assert_eq!(customer.phone.as_deref(), Some("+20 100 123 4567"));

        let err = engine
            .crm
            .update_customer(Uuid::new_v4(), Some("X".to_string()), None, None)
            .unwrap_err();
        assert!(matches!(err, AppError::CustomerNotFound));
    }

    #[test]
    fn reactivate_restores_subscription_unless_window_was_taken() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let today = engine.clock.now().date_naive();

        let first = engine
            .crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap();
        engine.crm.deactivate_subscription(first.id).unwrap();

        // Janela livre: religa normalmente.
        let first = engine.crm.reactivate_subscription(first.id).unwrap();
        assert!(first.is_active);

        // Outra assinatura ativa tomou a janela: religar a antiga falha.
        engine.crm.deactivate_subscription(first.id).unwrap();
        engine
            .crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap();
        let err = engine.crm.reactivate_subscription(first.id).unwrap_err();
        assert!(matches!(err, AppError::SubscriptionAlreadyActive));
    }

    #[test]
    fn inverted_window_fails_validation() {
        let engine = TestEngine::new();
        let customer_id = engine.seed_customer("Ahmed");
        let today = engine.clock.now().date_naive();

        let err = engine
            .crm
            .create_subscription(customer_id, today, today - Days::new(1))
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}

// src/services/test_support.rs
//
// Motor completo montado sobre o relógio manual, para os testes de
// serviço. Começa sempre no mesmo instante: cenários determinísticos.

use chrono::{Days, TimeZone, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::clock::{Clock, ManualClock},
    models::{resources::ResourceType, sessions::Session},
    services::{
        BillingService, CrmService, InventoryService, PaymentService, ResourceService,
        SessionService,
    },
    store::{LogSink, Store},
};

pub struct TestEngine {
    pub clock: Arc<ManualClock>,
    pub store: Store,
    pub crm: CrmService,
    pub resources: ResourceService,
    pub inventory: InventoryService,
    pub billing: BillingService,
    pub sessions: SessionService,
    pub payments: PaymentService,
}

impl TestEngine {
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        ));
        let store = Store::new();
        let sink = Arc::new(LogSink);

        let billing = BillingService::new(store.clone(), clock.clone(), sink.clone(), 7);
        Self {
            crm: CrmService::new(store.clone(), clock.clone()),
            resources: ResourceService::new(store.clone(), clock.clone()),
            inventory: InventoryService::new(store.clone(), clock.clone()),
            sessions: SessionService::new(store.clone(), billing.clone(), clock.clone(), sink.clone()),
            payments: PaymentService::new(store.clone(), clock.clone(), sink),
            billing,
            store,
            clock,
        }
    }

    pub fn seed_customer(&self, name: &str) -> Uuid {
        self.crm.create_customer(name.to_string(), None, None).id
    }

    pub fn seed_resource(&self, name: &str, rate: Decimal) -> Uuid {
        self.resources
            .create_resource(name.to_string(), ResourceType::Room, rate)
            .id
    }

    pub fn seed_item(&self, name: &str, price: Decimal, quantity: u32) -> Uuid {
        self.inventory
            .create_item(name.to_string(), price, quantity, 1)
            .id
    }

    // Assinatura cobrindo de hoje até +30 dias.
    pub fn seed_active_subscription(&self, customer_id: Uuid) -> Uuid {
        let today = self.clock.now().date_naive();
        self.crm
            .create_subscription(customer_id, today, today + Days::new(30))
            .unwrap()
            .id
    }

    // Sessão solta (fora do estado), para testar a fábrica de faturas
    // isoladamente.
    pub fn sample_session(&self, is_subscribed: bool) -> Session {
        Session {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            customer_name: "Ahmed".to_string(),
            resource_id: Uuid::new_v4(),
            resource_name: "Sala 1".to_string(),
            resource_rate: Decimal::from(100),
            started_at: self.clock.now(),
            is_subscribed,
            consumptions: Vec::new(),
            inventory_total: Decimal::ZERO,
        }
    }
}

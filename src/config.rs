// src/config.rs

use std::{env, sync::Arc};

use crate::{
    common::clock::{Clock, SystemClock},
    services::{
        BillingService, CrmService, DashboardService, InventoryService, PaymentService,
        ResourceService, SessionService,
    },
    store::{LogSink, PersistenceSink, Store},
};

const DEFAULT_INVOICE_DUE_DAYS: u64 = 7;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub crm_service: CrmService,
    pub resource_service: ResourceService,
    pub inventory_service: InventoryService,
    pub billing_service: BillingService,
    pub session_service: SessionService,
    pub payment_service: PaymentService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // Configuração de produção: relógio de sistema, sink de log e prazo
    // de vencimento vindo do ambiente.
    pub fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let invoice_due_days = match env::var("INVOICE_DUE_DAYS") {
            Ok(raw) => raw.parse()?,
            Err(_) => DEFAULT_INVOICE_DUE_DAYS,
        };

        Ok(Self::assemble(
            Arc::new(SystemClock),
            Arc::new(LogSink),
            invoice_due_days,
        ))
    }

    // --- Monta o gráfico de dependências ---
    // Separado de `new` para os testes injetarem relógio e sink próprios.
    pub fn assemble(
        clock: Arc<dyn Clock>,
        sink: Arc<dyn PersistenceSink>,
        invoice_due_days: u64,
    ) -> Self {
        let store = Store::new();

        let billing_service =
            BillingService::new(store.clone(), clock.clone(), sink.clone(), invoice_due_days);
        Self {
            crm_service: CrmService::new(store.clone(), clock.clone()),
            resource_service: ResourceService::new(store.clone(), clock.clone()),
            inventory_service: InventoryService::new(store.clone(), clock.clone()),
            session_service: SessionService::new(
                store.clone(),
                billing_service.clone(),
                clock.clone(),
                sink.clone(),
            ),
            payment_service: PaymentService::new(store.clone(), clock, sink),
            dashboard_service: DashboardService::new(store.clone()),
            billing_service,
            store,
        }
    }
}

// src/store.rs
//
// Camada de estado em memória. Cada submódulo é o equivalente de um
// repositório: um agregado por domínio, com métodos de mutação que
// validam antes de escrever.

pub mod activity;
pub mod billing;
pub mod crm;
pub mod inventory;
pub mod resources;
pub mod sessions;
pub mod sink;
pub mod subscriptions;

pub use activity::ActivityFeed;
pub use billing::InvoiceLedger;
pub use crm::CustomerDirectory;
pub use inventory::InventoryCatalog;
pub use resources::ResourceRegistry;
pub use sessions::ActiveSessions;
pub use sink::{LogSink, PersistenceSink};
pub use subscriptions::SubscriptionDirectory;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

// Todo o estado mutável do motor, atrás de UM único lock.
//
// Modelo de concorrência: toda operação de escrita pega o lock de
// escrita uma única vez, valida tudo e só então muta — cada chamada é
// uma transação curta, atômica e tudo-ou-nada. Leituras pegam o lock de
// leitura e enxergam um snapshot consistente. Nenhuma operação faz I/O
// segurando o lock.
#[derive(Default)]
pub struct EngineState {
    pub customers: CustomerDirectory,
    pub subscriptions: SubscriptionDirectory,
    pub resources: ResourceRegistry,
    pub inventory: InventoryCatalog,
    pub sessions: ActiveSessions,
    pub invoices: InvoiceLedger,
    pub activity: ActivityFeed,
}

#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<RwLock<EngineState>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> RwLockReadGuard<'_, EngineState> {
        // Lock envenenado não invalida o estado: toda mutação valida
        // antes de escrever, então recuperamos o guard e seguimos.
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, EngineState> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}

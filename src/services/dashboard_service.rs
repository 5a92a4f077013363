// src/services/dashboard_service.rs

use crate::{models::dashboard::Activity, store::Store};

// Leitura do feed de atividade, mais recente primeiro.
#[derive(Clone)]
pub struct DashboardService {
    store: Store,
}

impl DashboardService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn recent_activity(&self) -> Vec<Activity> {
        self.store.read().activity.list()
    }
}

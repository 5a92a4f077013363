// src/services/resource_service.rs

use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    models::resources::{Resource, ResourceType},
    store::Store,
};

// Cadastro dos recursos reserváveis. A alocação em si vive no
// SessionService; aqui é só cadastro e listagem.
#[derive(Clone)]
pub struct ResourceService {
    store: Store,
    clock: Arc<dyn Clock>,
}

impl ResourceService {
    pub fn new(store: Store, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    // Recurso novo nasce livre.
    pub fn create_resource(
        &self,
        name: String,
        resource_type: ResourceType,
        rate_per_hour: Decimal,
    ) -> Resource {
        let resource = Resource {
            id: Uuid::new_v4(),
            name,
            resource_type,
            rate_per_hour,
            available: true,
            created_at: self.clock.now(),
        };
        self.store.write().resources.insert(resource.clone());
        resource
    }

    pub fn get_resource(&self, id: Uuid) -> Result<Resource, AppError> {
        Ok(self.store.read().resources.get(id)?.clone())
    }

    // Tarifa nova só vale para sessões abertas daqui em diante: a sessão
    // ativa congelou a tarifa na abertura.
    pub fn update_resource(
        &self,
        id: Uuid,
        name: Option<String>,
        rate_per_hour: Option<Decimal>,
    ) -> Result<Resource, AppError> {
        let mut state = self.store.write();
        let resource = state.resources.get_mut(id)?;
        if let Some(name) = name {
            resource.name = name;
        }
        if let Some(rate) = rate_per_hour {
            resource.rate_per_hour = rate;
        }
        Ok(resource.clone())
    }

    pub fn list_resources(&self) -> Vec<Resource> {
        self.store.read().resources.list()
    }
}

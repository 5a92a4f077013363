// src/store/resources.rs

use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::resources::Resource};

// Registro de alocação dos recursos reserváveis.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: HashMap<Uuid, Resource>,
}

impl ResourceRegistry {
    pub fn insert(&mut self, resource: Resource) {
        self.resources.insert(resource.id, resource);
    }

    pub fn get(&self, id: Uuid) -> Result<&Resource, AppError> {
        self.resources.get(&id).ok_or(AppError::ResourceNotFound)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Resource, AppError> {
        self.resources
            .get_mut(&id)
            .ok_or(AppError::ResourceNotFound)
    }

    // Marca o recurso como ocupado. Falha sem mutar se ele não existe
    // ou já está ocupado.
    pub fn allocate(&mut self, id: Uuid) -> Result<(), AppError> {
        let resource = self
            .resources
            .get_mut(&id)
            .ok_or(AppError::ResourceNotFound)?;
        if !resource.available {
            return Err(AppError::ResourceUnavailable);
        }
        resource.available = false;
        Ok(())
    }

    // Libera um recurso ocupado. Liberar um recurso já livre é erro de
    // estado: indica que a invariante sessão<->recurso foi quebrada.
    pub fn release(&mut self, id: Uuid) -> Result<(), AppError> {
        let resource = self
            .resources
            .get_mut(&id)
            .ok_or(AppError::ResourceNotFound)?;
        if resource.available {
            return Err(AppError::ResourceNotAllocated);
        }
        resource.available = true;
        Ok(())
    }

    pub fn list(&self) -> Vec<Resource> {
        let mut all: Vec<Resource> = self.resources.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }
}

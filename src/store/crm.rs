// src/store/crm.rs

use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::crm::Customer};

#[derive(Default)]
pub struct CustomerDirectory {
    customers: HashMap<Uuid, Customer>,
}

impl CustomerDirectory {
    pub fn insert(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }

    pub fn get(&self, id: Uuid) -> Result<&Customer, AppError> {
        self.customers.get(&id).ok_or(AppError::CustomerNotFound)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Customer, AppError> {
        self.customers
            .get_mut(&id)
            .ok_or(AppError::CustomerNotFound)
    }

    pub fn list(&self) -> Vec<Customer> {
        let mut all: Vec<Customer> = self.customers.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }
}

// src/store/subscriptions.rs

use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::subscriptions::Subscription};

#[derive(Default)]
pub struct SubscriptionDirectory {
    subscriptions: HashMap<Uuid, Subscription>,
}

impl SubscriptionDirectory {
    pub fn insert(&mut self, subscription: Subscription) {
        self.subscriptions.insert(subscription.id, subscription);
    }

    // Assinatura ativa do cliente "em tal data". É consultada uma única
    // vez, na abertura da sessão.
    pub fn active_for(&self, customer_id: Uuid, on: NaiveDate) -> Option<&Subscription> {
        self.subscriptions
            .values()
            .find(|s| s.customer_id == customer_id && s.covers(on))
    }

    pub fn has_active(&self, customer_id: Uuid, on: NaiveDate) -> bool {
        self.active_for(customer_id, on).is_some()
    }

    // Alguma assinatura ativa do cliente cruza a janela [start, end]?
    pub fn overlaps_active(&self, customer_id: Uuid, start: NaiveDate, end: NaiveDate) -> bool {
        self.subscriptions.values().any(|s| {
            s.customer_id == customer_id
                && s.is_active
                && s.start_date <= end
                && start <= s.end_date
        })
    }

    pub fn get(&self, id: Uuid) -> Result<&Subscription, AppError> {
        self.subscriptions
            .get(&id)
            .ok_or(AppError::SubscriptionNotFound)
    }

    pub fn deactivate(&mut self, id: Uuid) -> Result<&Subscription, AppError> {
        let sub = self
            .subscriptions
            .get_mut(&id)
            .ok_or(AppError::SubscriptionNotFound)?;
        sub.is_active = false;
        Ok(sub)
    }

    pub fn reactivate(&mut self, id: Uuid) -> Result<&Subscription, AppError> {
        let sub = self
            .subscriptions
            .get_mut(&id)
            .ok_or(AppError::SubscriptionNotFound)?;
        sub.is_active = true;
        Ok(sub)
    }

    pub fn list(&self) -> Vec<Subscription> {
        let mut all: Vec<Subscription> = self.subscriptions.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        all
    }
}

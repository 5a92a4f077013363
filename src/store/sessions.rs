// src/store/sessions.rs

use std::collections::HashMap;
use uuid::Uuid;

use crate::{common::error::AppError, models::sessions::Session};

// Conjunto de sessões ativas. Sessão encerrada sai daqui — procurar por
// ela depois disso é `SessionNotActive`.
#[derive(Default)]
pub struct ActiveSessions {
    sessions: HashMap<Uuid, Session>,
}

impl ActiveSessions {
    pub fn insert(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    pub fn get(&self, id: Uuid) -> Result<&Session, AppError> {
        self.sessions.get(&id).ok_or(AppError::SessionNotActive)
    }

    pub fn get_mut(&mut self, id: Uuid) -> Result<&mut Session, AppError> {
        self.sessions.get_mut(&id).ok_or(AppError::SessionNotActive)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Session, AppError> {
        self.sessions.remove(&id).ok_or(AppError::SessionNotActive)
    }

    // Regra herdada do balcão: um cliente só ocupa um recurso por vez.
    pub fn customer_has_session(&self, customer_id: Uuid) -> bool {
        self.sessions
            .values()
            .any(|s| s.customer_id == customer_id)
    }

    pub fn list(&self) -> Vec<Session> {
        let mut all: Vec<Session> = self.sessions.values().cloned().collect();
        all.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        all
    }
}

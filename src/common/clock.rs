// src/common/clock.rs

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

// O motor nunca chama `Utc::now()` direto: o relógio é injetado,
// para que os testes controlem a duração das sessões.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

// Relógio de produção.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Relógio determinístico para testes: começa num instante fixo e só
/// avança quando mandamos.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

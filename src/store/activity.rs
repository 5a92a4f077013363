// src/store/activity.rs

use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use uuid::Uuid;

use crate::models::dashboard::{Activity, ActivityKind};

const MAX_ENTRIES: usize = 50;

// Feed dos últimos eventos, mais recente primeiro.
#[derive(Default)]
pub struct ActivityFeed {
    entries: VecDeque<Activity>,
}

impl ActivityFeed {
    pub fn record(&mut self, kind: ActivityKind, description: String, at: DateTime<Utc>) {
        self.entries.push_front(Activity {
            id: Uuid::new_v4(),
            kind,
            description,
            timestamp: at,
        });
        self.entries.truncate(MAX_ENTRIES);
    }

    pub fn list(&self) -> Vec<Activity> {
        self.entries.iter().cloned().collect()
    }
}

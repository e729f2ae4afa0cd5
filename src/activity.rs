// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub at: DateTime<Utc>,
    pub message: String,
}

/// Append-only log of notable mutations, bounded to `capacity` entries.
/// The oldest entry goes first when the log is full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredLog")]
pub struct ActivityLog {
    capacity: usize,
    entries: VecDeque<ActivityEntry>,
}

/// Persisted shape; goes through the same capacity floor and trim as
/// [`ActivityLog::set_capacity`].
#[derive(Deserialize)]
struct StoredLog {
    capacity: usize,
    entries: VecDeque<ActivityEntry>,
}

impl From<StoredLog> for ActivityLog {
    fn from(stored: StoredLog) -> Self {
        let mut log = ActivityLog {
            capacity: stored.capacity,
            entries: stored.entries,
        };
        log.set_capacity(stored.capacity);
        log
    }
}

impl ActivityLog {
    pub fn with_capacity(capacity: usize) -> Self {
        ActivityLog {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, at: DateTime<Utc>, message: impl Into<String>) {
        self.entries.push_back(ActivityEntry {
            at,
            message: message.into(),
        });
        self.trim();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.trim();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ActivityEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn trim(&mut self) {
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_oldest_when_full() {
        let now = Utc::now();
        let mut log = ActivityLog::with_capacity(2);
        log.push(now, "a");
        log.push(now, "b");
        log.push(now, "c");
        let msgs: Vec<_> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(msgs, ["c", "b"]);
    }

    #[test]
    fn shrinking_capacity_trims_immediately() {
        let now = Utc::now();
        let mut log = ActivityLog::default();
        for i in 0..10 {
            log.push(now, format!("m{}", i));
        }
        log.set_capacity(3);
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().last().unwrap().message, "m7");
        log.set_capacity(0);
        assert_eq!(log.capacity(), 1);
    }

    #[test]
    fn stored_log_gets_capacity_floor_and_trim() {
        let raw = r#"{"capacity":0,"entries":[
            {"at":"2025-01-01T00:00:00Z","message":"old"},
            {"at":"2025-01-02T00:00:00Z","message":"new"}
        ]}"#;
        let mut log: ActivityLog = serde_json::from_str(raw).unwrap();
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().message, "new");

        log.push(Utc::now(), "next");
        assert_eq!(log.len(), 1);
        assert_eq!(log.iter().next().unwrap().message, "next");
    }
}

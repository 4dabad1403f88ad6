use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

pub const WEBHOOK_HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRecord {
    #[serde(with = "time::serde::rfc3339")]
    pub received_at: OffsetDateTime,
    pub payload: Value,
}

/// Bounded, in-memory history of inbound webhook deliveries.
///
/// Holds at most `capacity` records; pushing past that evicts the oldest.
pub struct WebhookBuffer {
    capacity: usize,
    records: Mutex<VecDeque<WebhookRecord>>,
}

impl Default for WebhookBuffer {
    fn default() -> Self {
        Self::with_capacity(WEBHOOK_HISTORY_CAPACITY)
    }
}

impl WebhookBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records `payload` as received now and returns the stored record.
    pub fn push(&self, payload: Value) -> WebhookRecord {
        let record = WebhookRecord {
            received_at: OffsetDateTime::now_utc(),
            payload,
        };

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push_back(record.clone());
        while records.len() > self.capacity {
            records.pop_front();
        }
        record
    }

    /// Snapshot of the stored records, oldest first.
    pub fn recent(&self) -> Vec<WebhookRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

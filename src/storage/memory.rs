//! In-process storage implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::OrderRecord;
use crate::storage::{OrderStore, PutOutcome};

/// HashMap-backed order store with the same conditional-insert contract as
/// the DynamoDB backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, OrderRecord>>,
    failing: AtomicBool,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of persisted records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Whether no records are persisted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn put_if_absent(&self, record: &OrderRecord) -> Result<PutOutcome> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage("simulated storage failure"));
        }

        let mut records = self.records.lock().unwrap();
        if records.contains_key(&record.order_id) {
            return Ok(PutOutcome::AlreadyExists);
        }

        records.insert(record.order_id.clone(), record.clone());
        Ok(PutOutcome::Created)
    }

    async fn get(&self, order_id: &str) -> Result<Option<OrderRecord>> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage("simulated storage failure"));
        }

        Ok(self.records.lock().unwrap().get(order_id).cloned())
    }
}

//! Storage abstractions for order persistence.
//!
//! The Consumer writes through the [`OrderStore`] trait:
//! - [`DynamoStore`] is the deployed backend
//! - [`MemoryStore`] is an in-process backend for tests and local runs
//!
//! The single synchronization point of the whole pipeline is
//! [`OrderStore::put_if_absent`]: a conditional insert that succeeds at most
//! once per `order_id`, which is what turns at-least-once delivery into
//! exactly-once effect.

pub mod dynamo;
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::OrderRecord;

// Re-export for convenience
pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// Outcome of a conditional insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// The record was written; this delivery was the first
    Created,
    /// A record already exists under this `order_id`; a prior delivery won
    AlreadyExists,
}

/// Trait for order storage backends.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert the record only if no record exists under its `order_id`.
    ///
    /// A rejected condition is reported as [`PutOutcome::AlreadyExists`],
    /// not as an error: duplicate delivery is expected under at-least-once
    /// semantics.
    async fn put_if_absent(&self, record: &OrderRecord) -> Result<PutOutcome>;

    /// Fetch a record by `order_id`.
    async fn get(&self, order_id: &str) -> Result<Option<OrderRecord>>;
}

//! Queue abstractions for order submission.
//!
//! The Producer talks to the queue through the [`OrderQueue`] trait:
//! - [`SqsQueue`] is the deployed backend
//! - [`MemoryQueue`] is an in-process backend for tests and local runs
//!
//! Every order message carries the `OrderType` and `Priority` attributes so
//! downstream consumers can filter without parsing the body.

pub mod memory;
pub mod sqs;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Order;

// Re-export for convenience
pub use memory::MemoryQueue;
pub use sqs::SqsQueue;

/// Message attribute carrying the order kind.
pub const ATTR_ORDER_TYPE: &str = "OrderType";

/// Attribute value for newly submitted orders.
pub const ORDER_TYPE_NEW: &str = "NEW_ORDER";

/// Message attribute carrying the delivery priority.
pub const ATTR_PRIORITY: &str = "Priority";

/// Attribute value for normal-priority orders.
pub const PRIORITY_NORMAL: &str = "NORMAL";

/// Receipt for a message accepted by the queue.
#[derive(Debug, Clone)]
pub struct EnqueueReceipt {
    /// Queue-assigned message identifier
    pub message_id: String,
}

/// Trait for order queue backends.
#[async_trait]
pub trait OrderQueue: Send + Sync {
    /// Submit one order message.
    ///
    /// The order is serialized into the message body as JSON; the standard
    /// `OrderType`/`Priority` attributes are attached. Failures are
    /// classified as [`crate::error::AppError::Queue`].
    async fn send(&self, order: &Order) -> Result<EnqueueReceipt>;
}

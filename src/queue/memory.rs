//! In-process queue implementation for tests and local runs.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::Order;
use crate::queue::{EnqueueReceipt, OrderQueue};

/// Vec-backed queue that records every sent order.
#[derive(Debug, Default)]
pub struct MemoryQueue {
    sent: Mutex<Vec<Order>>,
    failing: AtomicBool,
}

impl MemoryQueue {
    /// Create an empty in-memory queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `send` fail with a queue error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of all orders sent so far.
    pub fn sent(&self) -> Vec<Order> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of orders sent so far.
    pub fn len(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Whether no orders have been sent.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderQueue for MemoryQueue {
    async fn send(&self, order: &Order) -> Result<EnqueueReceipt> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::queue("simulated queue failure"));
        }

        let mut sent = self.sent.lock().unwrap();
        sent.push(order.clone());

        Ok(EnqueueReceipt {
            message_id: format!("mem-{}", sent.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;

    fn sample_order() -> Order {
        Order {
            order_id: "order-1".to_string(),
            created_at: "2026-08-08T10:00:00.000000Z".to_string(),
            customer_name: "Alice".to_string(),
            items: vec![OrderItem {
                name: "Book".to_string(),
                quantity: 2,
                price: 9.5,
            }],
            total_amount: 19.0,
            request_id: "req-1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_records_order() {
        let queue = MemoryQueue::new();
        let receipt = queue.send(&sample_order()).await.unwrap();

        assert_eq!(receipt.message_id, "mem-1");
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.sent()[0].order_id, "order-1");
    }

    #[tokio::test]
    async fn test_failing_mode() {
        let queue = MemoryQueue::new();
        queue.set_failing(true);

        let err = queue.send(&sample_order()).await.unwrap_err();
        assert!(matches!(err, AppError::Queue(_)));
        assert!(queue.is_empty());
    }
}

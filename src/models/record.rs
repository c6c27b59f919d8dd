//! Persisted order record.

use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderItem};
use crate::utils::time;

/// Processing state of an order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted by the Producer, not yet processed
    Pending,
    /// Fully processed by the Consumer
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
        }
    }
}

/// Outcome of the order-processing step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// Final status, always `Completed` in this design
    pub status: OrderStatus,

    /// ISO-8601 UTC timestamp of processing completion
    pub processed_at: String,
}

/// An order as persisted in the table, keyed by `order_id`.
///
/// Written at most logically once per `order_id`: the write is conditional
/// on no record existing under the key. Never mutated after creation; the
/// table's TTL mechanism removes it autonomously once `expires_at` passes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    /// Partition key and idempotency key
    pub order_id: String,

    /// Enqueue timestamp, copied from the order
    pub created_at: String,

    /// Customer display name
    pub customer_name: String,

    /// Ordered line items
    pub items: Vec<OrderItem>,

    /// Order total
    pub total_amount: f64,

    /// Processing state
    pub status: OrderStatus,

    /// Processing completion timestamp
    pub processed_at: String,

    /// Expiry in UNIX seconds, consumed by the table's TTL mechanism
    pub expires_at: i64,

    /// Correlation id of the producing invocation
    pub request_id: String,
}

impl OrderRecord {
    /// Assemble the record persisted after processing an order.
    pub fn new(order: &Order, result: &ProcessingResult, ttl_days: i64) -> Self {
        Self {
            order_id: order.order_id.clone(),
            created_at: order.created_at.clone(),
            customer_name: order.customer_name.clone(),
            items: order.items.clone(),
            total_amount: order.total_amount,
            status: result.status,
            processed_at: result.processed_at.clone(),
            expires_at: time::expiry_epoch(ttl_days),
            request_id: order.request_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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

    #[test]
    fn test_record_copies_order_fields() {
        let order = sample_order();
        let result = ProcessingResult {
            status: OrderStatus::Completed,
            processed_at: "2026-08-08T10:00:01.000000Z".to_string(),
        };

        let record = OrderRecord::new(&order, &result, 30);

        assert_eq!(record.order_id, order.order_id);
        assert_eq!(record.created_at, order.created_at);
        assert_eq!(record.customer_name, order.customer_name);
        assert_eq!(record.items, order.items);
        assert_eq!(record.total_amount, order.total_amount);
        assert_eq!(record.status, OrderStatus::Completed);
        assert_eq!(record.request_id, order.request_id);
    }

    #[test]
    fn test_expires_at_is_ttl_days_out() {
        let order = sample_order();
        let result = ProcessingResult {
            status: OrderStatus::Completed,
            processed_at: "2026-08-08T10:00:01.000000Z".to_string(),
        };

        let record = OrderRecord::new(&order, &result, 30);

        let expected = Utc::now().timestamp() + 30 * 24 * 60 * 60;
        assert!((record.expires_at - expected).abs() <= 5);
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        assert_eq!(OrderStatus::Completed.as_str(), "COMPLETED");
    }
}

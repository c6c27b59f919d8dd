//! Order processing step.
//!
//! Business-logic placeholder: real deployments would allocate inventory,
//! capture payment, or notify external systems here. This implementation
//! logs itemized detail and stamps the completion status.

use tracing::info;

use crate::models::{Order, OrderStatus, ProcessingResult};
use crate::utils::time;

/// Process one order and produce its completion result.
pub fn process_order(order: &Order) -> ProcessingResult {
    info!(
        order_id = %order.order_id,
        customer_name = %order.customer_name,
        item_count = order.items.len(),
        total_amount = order.total_amount,
        "processing order"
    );

    for (i, item) in order.items.iter().enumerate() {
        info!(
            order_id = %order.order_id,
            position = i + 1,
            name = %item.name,
            quantity = item.quantity,
            price = item.price,
            subtotal = item.subtotal(),
            "processing line item"
        );
    }

    info!(
        order_id = %order.order_id,
        status = OrderStatus::Completed.as_str(),
        "order processing complete"
    );

    ProcessingResult {
        status: OrderStatus::Completed,
        processed_at: time::now_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderItem;

    #[test]
    fn test_process_order_completes() {
        let order = Order {
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
        };

        let result = process_order(&order);
        assert_eq!(result.status, OrderStatus::Completed);
        assert!(result.processed_at.ends_with('Z'));
    }
}

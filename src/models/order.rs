//! Order entity and submission validation.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::utils::time;

/// A single line item of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Item display name
    pub name: String,

    /// Ordered quantity, always positive
    pub quantity: u64,

    /// Unit price, never negative
    pub price: f64,
}

impl OrderItem {
    /// Line subtotal (`quantity * price`).
    pub fn subtotal(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

/// An order as carried in the queue message body.
///
/// Created by the Producer, immutable once enqueued. `order_id` doubles as
/// the idempotency key for the Consumer's conditional write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier (UUID v4), generated at submission time
    pub order_id: String,

    /// ISO-8601 UTC timestamp set at enqueue time
    pub created_at: String,

    /// Customer display name
    pub customer_name: String,

    /// Ordered line items, never empty
    pub items: Vec<OrderItem>,

    /// Order total, never negative
    pub total_amount: f64,

    /// Request id of the producing invocation, carried through for tracing
    pub request_id: String,
}

/// Validated fields of an inbound submission, before enrichment.
#[derive(Debug, Deserialize)]
struct Submission {
    customer_name: String,
    items: Vec<OrderItem>,
    total_amount: f64,
}

impl Order {
    /// Build an [`Order`] from a raw submission payload.
    ///
    /// Validates the payload first (fail-fast, first violation wins), then
    /// stamps a fresh `order_id` and `created_at` and attaches the caller's
    /// correlation id. No side effect happens here, so a rejected submission
    /// is never partially enqueued.
    pub fn from_submission(data: &Value, request_id: &str) -> Result<Self> {
        validate_order(data)?;

        let submission: Submission = serde_json::from_value(data.clone())
            .map_err(|e| AppError::unexpected(format!("validated payload did not convert: {e}")))?;

        Ok(Self {
            order_id: Uuid::new_v4().to_string(),
            created_at: time::now_rfc3339(),
            customer_name: submission.customer_name,
            items: submission.items,
            total_amount: submission.total_amount,
            request_id: request_id.to_string(),
        })
    }
}

/// Validate a raw order submission.
///
/// Rules, checked in order with the first violation reported:
/// - `customer_name`, `items`, `total_amount` must be present
/// - `customer_name` must be a non-blank string
/// - `items` must be a non-empty array of objects, each carrying a string
///   `name`, a positive integer `quantity`, and a non-negative `price`
/// - `total_amount` must be a non-negative number
pub fn validate_order(data: &Value) -> Result<()> {
    let obj = data
        .as_object()
        .ok_or_else(|| AppError::validation("order", "must be a JSON object"))?;

    for field in ["customer_name", "items", "total_amount"] {
        if !obj.contains_key(field) {
            return Err(AppError::validation(field, "is required"));
        }
    }

    let customer_name = obj["customer_name"]
        .as_str()
        .ok_or_else(|| AppError::validation("customer_name", "must be a string"))?;
    if customer_name.trim().is_empty() {
        return Err(AppError::validation("customer_name", "must not be empty"));
    }

    let items = obj["items"]
        .as_array()
        .ok_or_else(|| AppError::validation("items", "must be an array"))?;
    if items.is_empty() {
        return Err(AppError::validation("items", "must contain at least one item"));
    }

    for (i, item) in items.iter().enumerate() {
        validate_item(i, item)?;
    }

    let total_amount = obj["total_amount"]
        .as_f64()
        .ok_or_else(|| AppError::validation("total_amount", "must be a number"))?;
    if total_amount < 0.0 {
        return Err(AppError::validation("total_amount", "must not be negative"));
    }

    Ok(())
}

fn validate_item(index: usize, item: &Value) -> Result<()> {
    let obj = item
        .as_object()
        .ok_or_else(|| AppError::validation(format!("items[{index}]"), "must be an object"))?;

    for field in ["name", "quantity", "price"] {
        if !obj.contains_key(field) {
            return Err(AppError::validation(
                format!("items[{index}].{field}"),
                "is required",
            ));
        }
    }

    if !obj["name"].is_string() {
        return Err(AppError::validation(
            format!("items[{index}].name"),
            "must be a string",
        ));
    }

    match obj["quantity"].as_u64() {
        Some(q) if q > 0 => {}
        _ => {
            return Err(AppError::validation(
                format!("items[{index}].quantity"),
                "must be a positive integer",
            ));
        }
    }

    match obj["price"].as_f64() {
        Some(p) if p >= 0.0 => {}
        _ => {
            return Err(AppError::validation(
                format!("items[{index}].price"),
                "must be a non-negative number",
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_submission() -> Value {
        json!({
            "customer_name": "Alice",
            "items": [{"name": "Book", "quantity": 2, "price": 9.5}],
            "total_amount": 19.0
        })
    }

    #[test]
    fn test_from_submission_builds_order() {
        let order = Order::from_submission(&sample_submission(), "req-1").unwrap();

        assert!(!order.order_id.is_empty());
        assert!(order.created_at.ends_with('Z'));
        assert_eq!(order.customer_name, "Alice");
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].price, 9.5);
        assert_eq!(order.total_amount, 19.0);
        assert_eq!(order.request_id, "req-1");
    }

    #[test]
    fn test_order_ids_are_unique() {
        let a = Order::from_submission(&sample_submission(), "req-1").unwrap();
        let b = Order::from_submission(&sample_submission(), "req-1").unwrap();
        assert_ne!(a.order_id, b.order_id);
    }

    #[test]
    fn test_order_round_trips_through_json() {
        let order = Order::from_submission(&sample_submission(), "req-1").unwrap();
        let body = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, order);
    }

    #[test]
    fn test_missing_required_fields() {
        for field in ["customer_name", "items", "total_amount"] {
            let mut data = sample_submission();
            data.as_object_mut().unwrap().remove(field);

            let err = validate_order(&data).unwrap_err();
            assert!(matches!(err, AppError::Validation { field: f, .. } if f == field));
        }
    }

    #[test]
    fn test_blank_customer_name() {
        let mut data = sample_submission();
        data["customer_name"] = json!("   ");
        assert!(validate_order(&data).is_err());
    }

    #[test]
    fn test_customer_name_must_be_string() {
        let mut data = sample_submission();
        data["customer_name"] = json!(42);
        assert!(validate_order(&data).is_err());
    }

    #[test]
    fn test_empty_items() {
        let mut data = sample_submission();
        data["items"] = json!([]);

        let err = validate_order(&data).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "items"));
    }

    #[test]
    fn test_item_missing_price() {
        let mut data = sample_submission();
        data["items"] = json!([{"name": "Book", "quantity": 1}]);

        let err = validate_order(&data).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "items[0].price"));
    }

    #[test]
    fn test_item_quantity_must_be_positive_integer() {
        for bad in [json!(0), json!(-1), json!(1.5), json!("2")] {
            let mut data = sample_submission();
            data["items"][0]["quantity"] = bad;
            assert!(validate_order(&data).is_err());
        }
    }

    #[test]
    fn test_item_price_must_be_non_negative() {
        let mut data = sample_submission();
        data["items"][0]["price"] = json!(-0.5);
        assert!(validate_order(&data).is_err());
    }

    #[test]
    fn test_negative_total_amount() {
        let mut data = sample_submission();
        data["total_amount"] = json!(-1);
        assert!(validate_order(&data).is_err());
    }

    #[test]
    fn test_first_violation_wins() {
        // Both customer_name and items are invalid; customer_name is
        // checked first and must be the one reported.
        let data = json!({
            "customer_name": "",
            "items": [],
            "total_amount": 1.0
        });

        let err = validate_order(&data).unwrap_err();
        assert!(matches!(err, AppError::Validation { field, .. } if field == "customer_name"));
    }

    #[test]
    fn test_subtotal() {
        let item = OrderItem {
            name: "Book".to_string(),
            quantity: 3,
            price: 2.5,
        };
        assert_eq!(item.subtotal(), 7.5);
    }
}

//! AWS DynamoDB storage implementation.
//!
//! Records are keyed by `order_id` and written with
//! `attribute_not_exists(order_id)`, so a duplicate delivery can never
//! overwrite or double-write an order. Numbers travel as DynamoDB number
//! strings; Rust's shortest-representation float formatting makes the
//! `f64 -> string -> f64` round trip exact.

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::{info, warn};

use crate::error::{AppError, Result};
use crate::models::{OrderItem, OrderRecord, OrderStatus};
use crate::storage::{OrderStore, PutOutcome};

/// Partition key attribute of the order table.
const KEY_ORDER_ID: &str = "order_id";

/// DynamoDB-backed order store.
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a new DynamoDB store instance.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl OrderStore for DynamoStore {
    async fn put_if_absent(&self, record: &OrderRecord) -> Result<PutOutcome> {
        info!(
            order_id = %record.order_id,
            table_name = %self.table_name,
            "writing order record"
        );

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(record)))
            .condition_expression("attribute_not_exists(order_id)")
            .send()
            .await;

        match result {
            Ok(_) => {
                info!(order_id = %record.order_id, "order record written");
                Ok(PutOutcome::Created)
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_conditional_check_failed_exception() {
                    // A prior delivery already persisted this order.
                    warn!(
                        order_id = %record.order_id,
                        "order already persisted, treating as success"
                    );
                    Ok(PutOutcome::AlreadyExists)
                } else {
                    Err(AppError::storage(service_err.to_string()))
                }
            }
        }
    }

    async fn get(&self, order_id: &str) -> Result<Option<OrderRecord>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(KEY_ORDER_ID, AttributeValue::S(order_id.to_string()))
            .send()
            .await
            .map_err(|e| AppError::storage(e.into_service_error().to_string()))?;

        match output.item() {
            Some(item) => Ok(Some(from_item(item)?)),
            None => Ok(None),
        }
    }
}

/// Convert a record into a DynamoDB item map.
pub fn to_item(record: &OrderRecord) -> HashMap<String, AttributeValue> {
    let items = record
        .items
        .iter()
        .map(|item| {
            let mut map = HashMap::new();
            map.insert("name".to_string(), AttributeValue::S(item.name.clone()));
            map.insert(
                "quantity".to_string(),
                AttributeValue::N(item.quantity.to_string()),
            );
            map.insert(
                "price".to_string(),
                AttributeValue::N(item.price.to_string()),
            );
            AttributeValue::M(map)
        })
        .collect();

    HashMap::from([
        (
            KEY_ORDER_ID.to_string(),
            AttributeValue::S(record.order_id.clone()),
        ),
        (
            "created_at".to_string(),
            AttributeValue::S(record.created_at.clone()),
        ),
        (
            "customer_name".to_string(),
            AttributeValue::S(record.customer_name.clone()),
        ),
        ("items".to_string(), AttributeValue::L(items)),
        (
            "total_amount".to_string(),
            AttributeValue::N(record.total_amount.to_string()),
        ),
        (
            "status".to_string(),
            AttributeValue::S(record.status.as_str().to_string()),
        ),
        (
            "processed_at".to_string(),
            AttributeValue::S(record.processed_at.clone()),
        ),
        (
            "expires_at".to_string(),
            AttributeValue::N(record.expires_at.to_string()),
        ),
        (
            "request_id".to_string(),
            AttributeValue::S(record.request_id.clone()),
        ),
    ])
}

/// Convert a DynamoDB item map back into a record.
pub fn from_item(item: &HashMap<String, AttributeValue>) -> Result<OrderRecord> {
    let items = item
        .get("items")
        .and_then(|v| v.as_l().ok())
        .ok_or_else(|| AppError::storage("missing or non-list attribute 'items'"))?
        .iter()
        .map(|entry| {
            let map = entry
                .as_m()
                .map_err(|_| AppError::storage("order item is not a map"))?;
            Ok(OrderItem {
                name: string_attr(map, "name")?,
                quantity: number_attr(map, "quantity")?,
                price: number_attr(map, "price")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let status = match string_attr(item, "status")?.as_str() {
        "PENDING" => OrderStatus::Pending,
        "COMPLETED" => OrderStatus::Completed,
        other => {
            return Err(AppError::storage(format!("unknown order status '{other}'")));
        }
    };

    Ok(OrderRecord {
        order_id: string_attr(item, KEY_ORDER_ID)?,
        created_at: string_attr(item, "created_at")?,
        customer_name: string_attr(item, "customer_name")?,
        items,
        total_amount: number_attr(item, "total_amount")?,
        status,
        processed_at: string_attr(item, "processed_at")?,
        expires_at: number_attr(item, "expires_at")?,
        request_id: string_attr(item, "request_id")?,
    })
}

fn string_attr(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .cloned()
        .ok_or_else(|| AppError::storage(format!("missing or non-string attribute '{key}'")))
}

fn number_attr<T: FromStr>(item: &HashMap<String, AttributeValue>, key: &str) -> Result<T> {
    item.get(key)
        .and_then(|v| v.as_n().ok())
        .and_then(|n| n.parse().ok())
        .ok_or_else(|| AppError::storage(format!("missing or non-numeric attribute '{key}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> OrderRecord {
        OrderRecord {
            order_id: "order-1".to_string(),
            created_at: "2026-08-08T10:00:00.000000Z".to_string(),
            customer_name: "Alice".to_string(),
            items: vec![
                OrderItem {
                    name: "Book".to_string(),
                    quantity: 2,
                    price: 9.5,
                },
                OrderItem {
                    name: "Pen".to_string(),
                    quantity: 10,
                    price: 0.1,
                },
            ],
            total_amount: 20.0,
            status: OrderStatus::Completed,
            processed_at: "2026-08-08T10:00:01.000000Z".to_string(),
            expires_at: 1_789_000_000,
            request_id: "req-1".to_string(),
        }
    }

    #[test]
    fn test_item_round_trip() {
        let record = sample_record();
        let restored = from_item(&to_item(&record)).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_numeric_encoding_is_exact() {
        // 0.1 has no finite binary representation; the number-string
        // encoding must still restore the identical f64.
        let record = sample_record();
        let restored = from_item(&to_item(&record)).unwrap();

        assert_eq!(restored.items[1].price, 0.1_f64);
        assert_eq!(restored.total_amount, 20.0_f64);
        assert_eq!(restored.expires_at, 1_789_000_000);
    }

    #[test]
    fn test_from_item_rejects_missing_attribute() {
        let mut item = to_item(&sample_record());
        item.remove("customer_name");

        let err = from_item(&item).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn test_from_item_rejects_unknown_status() {
        let mut item = to_item(&sample_record());
        item.insert(
            "status".to_string(),
            AttributeValue::S("SHIPPED".to_string()),
        );

        assert!(from_item(&item).is_err());
    }

    #[test]
    fn test_item_has_key_and_ttl_attributes() {
        let item = to_item(&sample_record());
        assert!(matches!(item.get("order_id"), Some(AttributeValue::S(_))));
        assert!(matches!(item.get("expires_at"), Some(AttributeValue::N(_))));
    }
}

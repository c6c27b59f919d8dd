//! AWS SQS queue implementation.

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::types::MessageAttributeValue;
use tracing::info;

use crate::error::{AppError, Result};
use crate::models::Order;
use crate::queue::{
    ATTR_ORDER_TYPE, ATTR_PRIORITY, EnqueueReceipt, ORDER_TYPE_NEW, OrderQueue, PRIORITY_NORMAL,
};

/// SQS-backed order queue.
pub struct SqsQueue {
    client: Client,
    queue_url: String,
}

impl SqsQueue {
    /// Create a new SQS queue instance.
    pub fn new(client: Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }

    fn string_attribute(value: &str) -> Result<MessageAttributeValue> {
        MessageAttributeValue::builder()
            .data_type("String")
            .string_value(value)
            .build()
            .map_err(|e| AppError::queue(e.to_string()))
    }
}

#[async_trait]
impl OrderQueue for SqsQueue {
    async fn send(&self, order: &Order) -> Result<EnqueueReceipt> {
        let body = serde_json::to_string(order)?;

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .message_attributes(ATTR_ORDER_TYPE, Self::string_attribute(ORDER_TYPE_NEW)?)
            .message_attributes(ATTR_PRIORITY, Self::string_attribute(PRIORITY_NORMAL)?)
            .send()
            .await
            .map_err(|e| AppError::queue(e.into_service_error().to_string()))?;

        let message_id = output.message_id().unwrap_or_default().to_string();
        info!(
            order_id = %order.order_id,
            message_id = %message_id,
            "order message sent to queue"
        );

        Ok(EnqueueReceipt { message_id })
    }
}

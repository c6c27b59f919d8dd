//! Producer Lambda handler.
//!
//! Accepts an order submission from API Gateway, validates it, assigns a
//! unique order id, and enqueues an order message. Validation is purely
//! computed on the input and runs before the enqueue, so a rejected
//! submission never leaves a partial order behind.

pub mod response;

use std::sync::Arc;

use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::error::AppError;
use crate::models::Order;
use crate::queue::OrderQueue;

/// Producer handler with its process-scoped queue handle.
///
/// The queue is `None` when `SQS_QUEUE_URL` was absent at startup; the
/// handler then answers every submission with a configuration error
/// instead of crashing the runtime.
pub struct Producer {
    queue: Option<Arc<dyn OrderQueue>>,
}

impl Producer {
    /// Create a producer over an optional queue handle.
    pub fn new(queue: Option<Arc<dyn OrderQueue>>) -> Self {
        Self { queue }
    }

    /// Handle one API Gateway order submission.
    ///
    /// Always resolves to a proxy response; failures are encoded as HTTP
    /// status codes, never bubbled to the runtime.
    #[instrument(skip(self, event))]
    pub async fn handle(
        &self,
        event: LambdaEvent<ApiGatewayProxyRequest>,
    ) -> std::result::Result<ApiGatewayProxyResponse, LambdaError> {
        let (request, context) = event.into_parts();
        let request_id = context.request_id.clone();

        info!(request_id = %request_id, "received order submission");

        let Some(queue) = &self.queue else {
            error!("SQS_QUEUE_URL is not configured");
            return Ok(response::configuration_error());
        };

        let Some(body) = request.body.as_deref() else {
            warn!(request_id = %request_id, "request body is missing");
            return Ok(response::bad_request("request body is required"));
        };

        let data: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(e) => {
                warn!(request_id = %request_id, error = %e, "request body is not valid JSON");
                return Ok(response::bad_request("request body is not valid JSON"));
            }
        };

        let order = match Order::from_submission(&data, &request_id) {
            Ok(order) => order,
            Err(AppError::Validation { field, message }) => {
                warn!(
                    request_id = %request_id,
                    field = %field,
                    "order submission failed validation"
                );
                return Ok(response::validation_error(&field, &message));
            }
            Err(e) => {
                error!(request_id = %request_id, error = %e, "failed to build order");
                return Ok(response::server_error());
            }
        };

        info!(
            request_id = %request_id,
            order_id = %order.order_id,
            "submitting order to queue"
        );

        match queue.send(&order).await {
            Ok(receipt) => {
                info!(
                    order_id = %order.order_id,
                    message_id = %receipt.message_id,
                    "order accepted"
                );
                Ok(response::created(&order.order_id))
            }
            Err(e) => {
                error!(order_id = %order.order_id, error = %e, "failed to enqueue order");
                Ok(response::server_error())
            }
        }
    }
}

//! Consumer Lambda handler.
//!
//! Receives a batch of queue-delivered order messages, processes each one
//! independently, persists the result behind a conditional write, and
//! reports per-message failures back to the queue so only those messages
//! are redelivered.
//!
//! Per-message state machine:
//! `received -> parsed -> processed -> persisted(created | already-exists)
//! -> handled`, or `received -> parse-failed -> handled(dropped)`, or any
//! step `-> retryable-failure -> reported`.

pub mod process;

use std::sync::Arc;

use aws_lambda_events::event::sqs::{BatchItemFailure, SqsBatchResponse, SqsEvent, SqsMessage};
use lambda_runtime::{Error as LambdaError, LambdaEvent};
use tracing::{error, info, instrument, warn};

use crate::error::{AppError, Result};
use crate::models::{Order, OrderRecord};
use crate::storage::{OrderStore, PutOutcome};

/// How a successfully handled message was resolved.
#[derive(Debug)]
enum Disposition {
    /// First delivery: processed and persisted
    Completed { order_id: String },
    /// Duplicate delivery: a record already existed, treated as success
    AlreadyProcessed { order_id: String },
}

/// Consumer handler with its process-scoped store handle.
///
/// The store is `None` when `DYNAMODB_TABLE_NAME` was absent at startup;
/// affected messages are then dropped as non-retryable misconfiguration
/// failures (redelivery cannot fix a missing table name).
pub struct Consumer {
    store: Option<Arc<dyn OrderStore>>,
    ttl_days: i64,
}

impl Consumer {
    /// Create a consumer over an optional store handle.
    pub fn new(store: Option<Arc<dyn OrderStore>>, ttl_days: i64) -> Self {
        Self { store, ttl_days }
    }

    /// Handle one SQS batch.
    ///
    /// Messages are resolved sequentially and independently; one message's
    /// failure never aborts the batch. The returned report names exactly
    /// the messages whose failure was retryable — everything else is
    /// considered consumed by the queue.
    #[instrument(skip(self, event))]
    pub async fn handle(
        &self,
        event: LambdaEvent<SqsEvent>,
    ) -> std::result::Result<SqsBatchResponse, LambdaError> {
        let (sqs_event, context) = event.into_parts();
        let record_count = sqs_event.records.len();

        info!(
            request_id = %context.request_id,
            record_count,
            "consumer invoked"
        );

        let mut batch_item_failures = Vec::new();

        for record in &sqs_event.records {
            let message_id = record
                .message_id
                .clone()
                .unwrap_or_else(|| "unknown".to_string());

            match self.process_message(record).await {
                Ok(Disposition::Completed { order_id }) => {
                    info!(message_id = %message_id, order_id = %order_id, "message handled");
                }
                Ok(Disposition::AlreadyProcessed { order_id }) => {
                    info!(
                        message_id = %message_id,
                        order_id = %order_id,
                        "duplicate delivery resolved idempotently"
                    );
                }
                Err(e) if e.retryable() => {
                    error!(
                        message_id = %message_id,
                        error = %e,
                        "message failed, reporting for redelivery"
                    );
                    batch_item_failures.push(BatchItemFailure {
                        item_identifier: message_id,
                    });
                }
                Err(e) => {
                    // Redelivery cannot fix this message; leave it out of
                    // the report so the queue deletes it (or routes it to
                    // a dead-letter queue if one is attached).
                    error!(
                        message_id = %message_id,
                        error = %e,
                        "message failed permanently, dropping"
                    );
                }
            }
        }

        info!(
            total_records = record_count,
            success_count = record_count - batch_item_failures.len(),
            failure_count = batch_item_failures.len(),
            "batch complete"
        );

        Ok(SqsBatchResponse {
            batch_item_failures,
        })
    }

    /// Resolve a single message: parse, process, persist.
    async fn process_message(&self, record: &SqsMessage) -> Result<Disposition> {
        let receive_count = record
            .attributes
            .get("ApproximateReceiveCount")
            .map(String::as_str)
            .unwrap_or("1");
        info!(
            message_id = record.message_id.as_deref().unwrap_or("unknown"),
            approximate_receive_count = receive_count,
            "processing message"
        );

        let body = record.body.as_deref().unwrap_or_default();
        let order: Order = serde_json::from_str(body)
            .map_err(|e| AppError::malformed(format!("message body is not an order: {e}")))?;

        let result = process::process_order(&order);

        let store = self
            .store
            .as_ref()
            .ok_or_else(|| AppError::config("DYNAMODB_TABLE_NAME is not configured"))?;

        let order_record = OrderRecord::new(&order, &result, self.ttl_days);
        match store.put_if_absent(&order_record).await? {
            PutOutcome::Created => Ok(Disposition::Completed {
                order_id: order.order_id,
            }),
            PutOutcome::AlreadyExists => {
                warn!(order_id = %order.order_id, "order was already processed");
                Ok(Disposition::AlreadyProcessed {
                    order_id: order.order_id,
                })
            }
        }
    }
}

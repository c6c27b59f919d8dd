//! AWS Lambda entry point for the order Consumer.
//!
//! Deploy with `cargo lambda build --release --bin consumer`.
//! Triggered by SQS with `ReportBatchItemFailures` enabled, so only the
//! messages named in the returned report are redelivered.

use std::sync::Arc;

use aws_lambda_events::event::sqs::SqsEvent;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_pipeline::config::ConsumerConfig;
use order_pipeline::consumer::Consumer;
use order_pipeline::storage::{DynamoStore, OrderStore};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("order consumer starting...");

    // The table client lives for the whole container lifetime; handlers
    // receive it by reference across invocations.
    let config = ConsumerConfig::from_env();
    let store: Option<Arc<dyn OrderStore>> = match config.table_name {
        Some(table_name) => {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_dynamodb::Client::new(&aws_config);
            Some(Arc::new(DynamoStore::new(client, table_name)))
        }
        None => {
            warn!("DYNAMODB_TABLE_NAME is not set; all messages will be dropped");
            None
        }
    };

    let consumer = Consumer::new(store, config.ttl_days);
    lambda_runtime::run(service_fn(|event: LambdaEvent<SqsEvent>| {
        consumer.handle(event)
    }))
    .await
}

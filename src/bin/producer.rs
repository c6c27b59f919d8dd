//! AWS Lambda entry point for the order Producer.
//!
//! Deploy with `cargo lambda build --release --bin producer`.
//! Triggered by API Gateway proxy integration.

use std::sync::Arc;

use aws_lambda_events::event::apigw::ApiGatewayProxyRequest;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use order_pipeline::config::ProducerConfig;
use order_pipeline::producer::Producer;
use order_pipeline::queue::{OrderQueue, SqsQueue};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("order producer starting...");

    // The queue client lives for the whole container lifetime; handlers
    // receive it by reference across invocations.
    let config = ProducerConfig::from_env();
    let queue: Option<Arc<dyn OrderQueue>> = match config.queue_url {
        Some(queue_url) => {
            let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
            let client = aws_sdk_sqs::Client::new(&aws_config);
            Some(Arc::new(SqsQueue::new(client, queue_url)))
        }
        None => {
            warn!("SQS_QUEUE_URL is not set; all submissions will be rejected");
            None
        }
    };

    let producer = Producer::new(queue);
    lambda_runtime::run(service_fn(
        |event: LambdaEvent<ApiGatewayProxyRequest>| producer.handle(event),
    ))
    .await
}

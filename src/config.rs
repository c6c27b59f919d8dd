// src/config.rs

//! Environment-based configuration.
//!
//! All deployment-specific settings come from Lambda environment variables.
//! A missing queue url or table name is not a startup failure: the handlers
//! keep answering and surface a configuration error per request, so the
//! values are carried as `Option` and checked at invocation time.

/// Environment variable naming the destination SQS queue (Producer).
pub const ENV_QUEUE_URL: &str = "SQS_QUEUE_URL";

/// Environment variable naming the DynamoDB order table (Consumer).
pub const ENV_TABLE_NAME: &str = "DYNAMODB_TABLE_NAME";

/// Environment variable overriding the record TTL in days (Consumer).
pub const ENV_TTL_DAYS: &str = "ORDER_TTL_DAYS";

/// Default record TTL applied when `ORDER_TTL_DAYS` is not set.
pub const DEFAULT_TTL_DAYS: i64 = 30;

/// Producer-side configuration.
#[derive(Debug, Clone, Default)]
pub struct ProducerConfig {
    /// Destination queue url, if configured
    pub queue_url: Option<String>,
}

impl ProducerConfig {
    /// Read producer configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            queue_url: non_empty_var(ENV_QUEUE_URL),
        }
    }
}

/// Consumer-side configuration.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    /// Order table name, if configured
    pub table_name: Option<String>,

    /// Days until a persisted record expires via the table's TTL mechanism
    pub ttl_days: i64,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            table_name: None,
            ttl_days: DEFAULT_TTL_DAYS,
        }
    }
}

impl ConsumerConfig {
    /// Read consumer configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            table_name: non_empty_var(ENV_TABLE_NAME),
            ttl_days: parse_ttl_days(std::env::var(ENV_TTL_DAYS).ok()),
        }
    }
}

/// Read an environment variable, treating blank values as absent.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a TTL override, falling back to the default on absent or bad input.
fn parse_ttl_days(raw: Option<String>) -> i64 {
    raw.and_then(|v| v.trim().parse().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_TTL_DAYS)
}

//! API Gateway proxy-integration responses.
//!
//! The proxy contract wants `{statusCode, headers, body}` with a string
//! body; every response here is JSON with CORS headers attached.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::models::OrderStatus;

fn json_response(status_code: i64, body: &Value) -> ApiGatewayProxyResponse {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static("*"),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );

    ApiGatewayProxyResponse {
        status_code,
        headers,
        multi_value_headers: HeaderMap::new(),
        body: Some(Body::Text(body.to_string())),
        is_base64_encoded: false,
    }
}

/// 201 Created with the new order id and its pending status.
pub fn created(order_id: &str) -> ApiGatewayProxyResponse {
    json_response(
        201,
        &json!({
            "message": "Order accepted",
            "order_id": order_id,
            "status": OrderStatus::Pending,
        }),
    )
}

/// 400 for a missing or unparsable request body.
pub fn bad_request(message: &str) -> ApiGatewayProxyResponse {
    json_response(
        400,
        &json!({
            "error": "Bad Request",
            "message": message,
        }),
    )
}

/// 400 for a submission that failed validation, citing the field.
pub fn validation_error(field: &str, message: &str) -> ApiGatewayProxyResponse {
    json_response(
        400,
        &json!({
            "error": "Validation Error",
            "message": format!("{field} {message}"),
        }),
    )
}

/// 500 for a missing queue configuration.
pub fn configuration_error() -> ApiGatewayProxyResponse {
    json_response(
        500,
        &json!({
            "error": "Configuration Error",
            "message": "The order queue is not configured correctly",
        }),
    )
}

/// 500 for any internal failure; detail stays in the logs.
pub fn server_error() -> ApiGatewayProxyResponse {
    json_response(
        500,
        &json!({
            "error": "Internal Server Error",
            "message": "An error occurred while processing the order. Please try again later.",
        }),
    )
}

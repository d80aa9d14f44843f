//! Error mapping for backend APIs
//!
//! This module provides mapping functions to convert backend-specific
//! error responses to our normalized ServiceError type.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};
use crate::util::truncate_string;

/// Longest error body excerpt carried into an error message
const MAX_BODY_EXCERPT: usize = 200;

/// Map a Gemini API error to a ServiceError
///
/// Gemini reports errors as `{"error": {"code", "message", "status", "details"}}`
/// where `status` is a canonical gRPC code name. A rejected API key arrives as
/// `400 INVALID_ARGUMENT` with an `API_KEY_INVALID` reason in `details`.
pub fn map_gemini_error(
    status: StatusCode,
    json: &Value,
    context: &mut ErrorContext,
) -> ServiceError {
    context.service = "gemini".to_string();

    let Some(error) = json.get("error") else {
        let message = json.get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown Gemini error");
        return map_status(status, message);
    };

    let message = error.get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown Gemini error");

    let reason = error.get("details")
        .and_then(|d| d.as_array())
        .and_then(|details| {
            details.iter().find_map(|d| d.get("reason").and_then(|r| r.as_str()))
        });

    if let Some(reason) = reason {
        context.add("reason", reason);
    }

    let Some(canonical) = error.get("status").and_then(|s| s.as_str()) else {
        return map_status(status, message);
    };

    context.error_code = Some(canonical.to_string());

    match canonical {
        "UNAUTHENTICATED" => ServiceError::authentication(message),
        "INVALID_ARGUMENT" if reason == Some("API_KEY_INVALID") => {
            ServiceError::authentication(message)
        }
        "INVALID_ARGUMENT" => ServiceError::validation(message),
        "PERMISSION_DENIED" => ServiceError::authorization(message),
        "RESOURCE_EXHAUSTED" => ServiceError::rate_limit(message),
        "NOT_FOUND" => ServiceError::not_found(message),
        "DEADLINE_EXCEEDED" => ServiceError::timeout(message),
        "FAILED_PRECONDITION" => ServiceError::configuration(message),
        _ => map_status(status, message),
    }
}

/// Map a generic HTTP error to a ServiceError
pub fn map_http_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    // Try to parse as JSON first
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if context.service == "gemini" {
            return map_gemini_error(status, &json, context);
        }

        let message = json.get("message")
            .or_else(|| json.get("error"))
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| truncate_string(body, MAX_BODY_EXCERPT));

        return map_status(status, &message);
    }

    // Fallback to status-based mapping
    let message = if body.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, truncate_string(body, MAX_BODY_EXCERPT))
    };

    map_status(status, &message)
}

fn map_status(status: StatusCode, message: &str) -> ServiceError {
    match status {
        StatusCode::UNAUTHORIZED => ServiceError::authentication(message),
        StatusCode::FORBIDDEN => ServiceError::authorization(message),
        StatusCode::TOO_MANY_REQUESTS => ServiceError::rate_limit(message),
        StatusCode::BAD_REQUEST => ServiceError::validation(message),
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::timeout(message),
        _ => ServiceError::service(message),
    }
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}

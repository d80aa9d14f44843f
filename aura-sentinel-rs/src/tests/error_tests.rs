//! Tests for error handling functionality
//!
//! These tests verify the failure taxonomy and the mapping of Gemini error
//! bodies onto it.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::error::{mapping, ErrorContext, ServiceError};

    #[test]
    fn test_service_error_creation() {
        let network_err = ServiceError::network("Connection failed");
        let auth_err = ServiceError::authentication("Invalid credentials");
        let safety_err = ServiceError::safety_blocked("Candidate withheld: SAFETY");

        assert_eq!(network_err.to_string(), "Network error: Connection failed");
        assert_eq!(auth_err.to_string(), "Authentication error: Invalid credentials");
        assert_eq!(safety_err.to_string(), "Safety block: Candidate withheld: SAFETY");

        assert!(network_err.is_transient());
        assert!(!network_err.is_configuration());

        assert!(auth_err.is_configuration());
        assert!(!auth_err.is_transient());

        // Content failures are neither
        assert!(!safety_err.is_transient());
        assert!(!safety_err.is_configuration());
    }

    #[test]
    fn test_error_context() {
        let mut context = ErrorContext::for_service("gemini")
            .status_code(503)
            .request_id("req-123")
            .endpoint("models/gemini-1.5-pro:generateContent");
        context.add("reason", "MODEL_OVERLOADED");
        assert_eq!(context.data.get("reason").map(String::as_str), Some("MODEL_OVERLOADED"));

        let err = ServiceError::service("overloaded").with_context(context);

        assert_eq!(err.service_name(), Some("gemini"));
        assert_eq!(err.status_code(), Some(503));
        assert!(err.to_string().contains("overloaded"));
        assert!(matches!(err.root(), ServiceError::Service(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_nested_context_keeps_inner_details() {
        let err = ServiceError::rate_limit("quota")
            .with_context(ErrorContext::for_service("gemini").status_code(429).error_code("RESOURCE_EXHAUSTED"))
            .with_context(ErrorContext::new().request_id("req-9"));

        assert_eq!(err.status_code(), Some(429));
        assert_eq!(err.error_code(), Some("RESOURCE_EXHAUSTED"));
        assert!(matches!(err.root(), ServiceError::RateLimit(_)));
    }

    #[test]
    fn test_gemini_error_mapping() {
        let cases = [
            (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED", None),
            (StatusCode::FORBIDDEN, "PERMISSION_DENIED", None),
            (StatusCode::TOO_MANY_REQUESTS, "RESOURCE_EXHAUSTED", None),
            (StatusCode::NOT_FOUND, "NOT_FOUND", None),
            (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", Some("API_KEY_INVALID")),
            (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", None),
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE", None),
        ];

        let mapped: Vec<ServiceError> = cases
            .iter()
            .map(|(status, canonical, reason)| {
                let mut body = json!({
                    "error": {"code": status.as_u16(), "message": "boom", "status": canonical}
                });
                if let Some(reason) = reason {
                    body["error"]["details"] = json!([{"reason": reason}]);
                }
                let mut context = ErrorContext::for_service("gemini");
                mapping::map_gemini_error(*status, &body, &mut context)
            })
            .collect();

        assert!(matches!(mapped[0], ServiceError::Authentication(_)));
        assert!(matches!(mapped[1], ServiceError::Authorization(_)));
        assert!(matches!(mapped[2], ServiceError::RateLimit(_)));
        assert!(matches!(mapped[3], ServiceError::NotFound(_)));
        assert!(matches!(mapped[4], ServiceError::Authentication(_)));
        assert!(matches!(mapped[5], ServiceError::Validation(_)));
        assert!(matches!(mapped[6], ServiceError::Service(_)));
    }

    #[test]
    fn test_gemini_error_mapping_records_code() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT",
                "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]
            }
        });

        let mut context = ErrorContext::for_service("gemini");
        let err = mapping::map_gemini_error(StatusCode::BAD_REQUEST, &body, &mut context);

        assert!(err.is_configuration());
        assert_eq!(context.error_code.as_deref(), Some("INVALID_ARGUMENT"));
        assert_eq!(context.data.get("reason").map(String::as_str), Some("API_KEY_INVALID"));
    }

    #[test]
    fn test_http_error_mapping_without_json() {
        let mut context = ErrorContext::for_service("gemini");
        let err = mapping::map_http_error(StatusCode::BAD_GATEWAY, "<html>upstream down</html>", &mut context);

        assert!(matches!(err, ServiceError::Service(_)));
        assert!(err.to_string().contains("upstream down"));

        let mut context = ErrorContext::for_service("gemini");
        let err = mapping::map_http_error(StatusCode::GATEWAY_TIMEOUT, "", &mut context);
        assert!(matches!(err, ServiceError::Timeout(_)));
    }

    #[test]
    fn test_classify_http_error() {
        assert_eq!(mapping::classify_http_error(StatusCode::UNAUTHORIZED), "authentication");
        assert_eq!(mapping::classify_http_error(StatusCode::FORBIDDEN), "authorization");
        assert_eq!(mapping::classify_http_error(StatusCode::TOO_MANY_REQUESTS), "rate_limit");
        assert_eq!(mapping::classify_http_error(StatusCode::INTERNAL_SERVER_ERROR), "server");
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let err: ServiceError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();

        assert!(matches!(err.root(), ServiceError::Parsing(_)));
        assert_eq!(err.service_name(), Some("json"));
    }
}

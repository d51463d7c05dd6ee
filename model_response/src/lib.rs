#![deny(missing_docs)]
//! The JSON envelope every endpoint answers with, split into its own crate so
//! that validation and auth layers can produce envelope fragments without
//! pulling in the web stack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single field-level problem attached to a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDetails {
    /// Name of the offending field, when the problem is field-scoped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Machine-readable code, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Human-readable description of the problem.
    pub message: String,
}

impl ErrorDetails {
    /// A field-scoped error without a code.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            code: None,
            message: message.into(),
        }
    }

    /// A field-scoped error carrying a machine-readable code.
    pub fn with_code(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            code: Some(code.into()),
            message: message.into(),
        }
    }

    /// An error that applies to the payload as a whole.
    pub fn payload(message: impl Into<String>) -> Self {
        Self {
            field: None,
            code: None,
            message: message.into(),
        }
    }
}

/// The fixed success/error wrapper returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request achieved its intent.
    pub success: bool,
    /// Payload for successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Short human-readable summary for successful responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Top-level error description for failed responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Field-level problems for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDetails>>,
    /// Server time the response was produced.
    pub timestamp: DateTime<Utc>,
    /// Correlation id, unique per response.
    pub request_id: String,
}

fn generate_request_id() -> String {
    format!("req_{}", uuid::Uuid::new_v4().simple())
}

impl<T> ApiResponse<T> {
    /// A successful envelope wrapping `data`.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            error: None,
            errors: None,
            timestamp: Utc::now(),
            request_id: generate_request_id(),
        }
    }
}

impl ApiResponse<()> {
    /// A failed envelope with a top-level error only.
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            errors: None,
            timestamp: Utc::now(),
            request_id: generate_request_id(),
        }
    }

    /// A failed envelope carrying field-level validation errors.
    pub fn validation_failure(errors: Vec<ErrorDetails>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some("Validation failed".to_string()),
            errors: Some(errors),
            timestamp: Utc::now(),
            request_id: generate_request_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let response = ApiResponse::success(vec![1, 2, 3], "Fetched");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(value["message"], "Fetched");
        assert!(value.get("error").is_none());
        assert!(value.get("errors").is_none());
        assert!(value["timestamp"].is_string());
        assert!(value["requestId"].as_str().unwrap().starts_with("req_"));
    }

    #[test]
    fn error_envelope_shape() {
        let response = ApiResponse::error("Internal server error");
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Internal server error");
        assert!(value.get("data").is_none());
        assert!(value.get("message").is_none());
    }

    #[test]
    fn validation_envelope_carries_field_errors() {
        let response = ApiResponse::validation_failure(vec![
            ErrorDetails::new("roomId", "roomId is required"),
            ErrorDetails::with_code("stayType", "invalid_enum", "stayType must be one of: hourly, nightly"),
        ]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Validation failed");
        let errors = value["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "roomId");
        assert!(errors[0].get("code").is_none());
        assert_eq!(errors[1]["code"], "invalid_enum");
    }

    #[test]
    fn request_ids_are_unique() {
        let a = ApiResponse::error("x");
        let b = ApiResponse::error("x");
        assert_ne!(a.request_id, b.request_id);
    }
}

//! Error envelope
//!
//! The JSON body written for every failed request:
//!
//! ```json
//! { "timestamp": "...", "status": 404, "error": "Not Found",
//!   "errorCode": "RESOURCE_NOT_FOUND", "message": "...", "path": "/api/v1/projects/9" }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::app_error::AppError;
use super::code::ErrorCode;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: &'static str,
    pub error_code: ErrorCode,
    pub message: String,
    /// Request path; stamped by the HTTP layer once the URI is known
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            timestamp: Utc::now(),
            status: err.status_code(),
            error: err.kind().as_str(),
            error_code: err.code(),
            message: err.public_message().to_string(),
            path: String::new(),
            validation_errors: err
                .validation_errors()
                .filter(|errors| !errors.is_empty())
                .map(|errors| errors.to_map()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldErrors;

    #[test]
    fn test_envelope_keys_are_camel_case() {
        let body = ErrorResponse::from(&AppError::conflict(
            "Project already exists with title: P1",
        ))
        .with_path("/api/v1/admin/projects");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["status"], 409);
        assert_eq!(json["error"], "Conflict");
        assert_eq!(json["errorCode"], "DUPLICATE_RESOURCE");
        assert_eq!(json["message"], "Project already exists with title: P1");
        assert_eq!(json["path"], "/api/v1/admin/projects");
        assert!(json.get("validationErrors").is_none());
        assert!(json.get("timestamp").is_some());
    }

    #[test]
    fn test_validation_errors_are_listed() {
        let mut errors = FieldErrors::new();
        errors.add("name", "name is required");
        errors.add("priority", "priority must be greater than or equal to 0");
        let body = ErrorResponse::from(&AppError::validation(errors));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["errorCode"], "VALIDATION_ERROR");
        assert_eq!(json["validationErrors"]["name"], "name is required");
        assert_eq!(
            json["validationErrors"]["priority"],
            "priority must be greater than or equal to 0"
        );
    }

    #[test]
    fn test_server_error_message_is_generic() {
        let body = ErrorResponse::from(&AppError::internal("pool closed"));
        assert_eq!(body.error_code, ErrorCode::InternalError);
        assert!(!body.message.contains("pool"));
    }
}

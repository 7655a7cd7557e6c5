//! Error Code - Client-visible error classification
//!
//! The `errorCode` field of every error envelope. Unlike [`ErrorKind`],
//! which only chooses the HTTP status, a code tells the client *what*
//! went wrong.
//!
//! [`ErrorKind`]: super::kind::ErrorKind

use serde::Serialize;

/// Error code surfaced in the error envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorCode {
    /// One or more input fields failed validation
    ValidationError,
    /// A path or query value could not be coerced to the expected type
    TypeMismatch,
    /// The addressed resource does not exist (or is soft-deleted)
    ResourceNotFound,
    /// A uniqueness rule was violated
    DuplicateResource,
    /// Generic domain failure; the HTTP status is carried separately
    BusinessError,
    /// Missing or invalid bearer token
    Unauthorized,
    /// Authenticated, but the role does not grant access
    Forbidden,
    /// Anything unexpected
    InternalError,
}

impl ErrorCode {
    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::DuplicateResource => "DUPLICATE_RESOURCE",
            ErrorCode::BusinessError => "BUSINESS_ERROR",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_as_str() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::TypeMismatch,
            ErrorCode::ResourceNotFound,
            ErrorCode::DuplicateResource,
            ErrorCode::BusinessError,
            ErrorCode::Unauthorized,
            ErrorCode::Forbidden,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }
}

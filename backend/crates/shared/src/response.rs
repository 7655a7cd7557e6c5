//! Success envelope
//!
//! ```json
//! { "status": 200, "message": "Success", "data": { ... }, "timestamp": "..." }
//! ```
//!
//! `data` is omitted entirely when there is nothing to return.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";
pub const DEFAULT_CREATED_MESSAGE: &str = "Created successfully";

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    fn build(status: u16, message: impl Into<Cow<'static, str>>, data: Option<T>) -> Self {
        Self {
            status,
            message: message.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// 200 with the default message
    pub fn success(data: T) -> Self {
        Self::build(200, DEFAULT_SUCCESS_MESSAGE, Some(data))
    }

    /// 200 with a custom message
    pub fn success_with_message(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::build(200, message, Some(data))
    }

    /// 201 with the default message
    pub fn created(data: T) -> Self {
        Self::build(201, DEFAULT_CREATED_MESSAGE, Some(data))
    }

    /// 201 with a custom message
    pub fn created_with_message(message: impl Into<Cow<'static, str>>, data: T) -> Self {
        Self::build(201, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// 200 carrying only a message
    pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
        Self::build(200, message, None)
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, axum::Json(self)).into_response()
    }
}

//! Envelope-aware extractors

use axum::extract::path::ErrorKind as PathErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, RawPathParams, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;
use crate::error::code::ErrorCode;

/// JSON body extractor; malformed bodies become `VALIDATION_ERROR`
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
    AppError::bad_request(format!("Malformed JSON request: {}", rejection.body_text()))
        .with_code(ErrorCode::ValidationError)
}

/// Path extractor; values that fail to parse become `TYPE_MISMATCH`
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                let raw = RawPathParams::from_request_parts(parts, state).await.ok();
                let params: Vec<(String, String)> = raw
                    .map(|raw| {
                        raw.iter()
                            .map(|(k, v)| (k.to_string(), v.to_string()))
                            .collect()
                    })
                    .unwrap_or_default();
                Err(path_rejection(rejection, &params))
            }
        }
    }
}

fn path_rejection(rejection: PathRejection, params: &[(String, String)]) -> AppError {
    let PathRejection::FailedToDeserializePathParams(inner) = &rejection else {
        return AppError::internal(rejection.body_text());
    };

    let name_for = |value: &str| {
        params
            .iter()
            .find(|(_, v)| v == value)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| "path".to_string())
    };

    match inner.kind() {
        PathErrorKind::ParseErrorAtKey { key, value, .. } => AppError::type_mismatch(value, key),
        PathErrorKind::ParseErrorAtIndex { index, value, .. } => {
            let name = params
                .get(*index)
                .map(|(k, _)| k.clone())
                .unwrap_or_else(|| name_for(value));
            AppError::type_mismatch(value, name)
        }
        PathErrorKind::ParseError { value, .. } => AppError::type_mismatch(value, name_for(value)),
        PathErrorKind::DeserializeError { key, value, .. } => AppError::type_mismatch(value, key),
        _ => AppError::bad_request(rejection.body_text()).with_code(ErrorCode::TypeMismatch),
    }
}

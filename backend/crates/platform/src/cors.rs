//! CORS layer construction
//!
//! Settings arrive as comma-separated lists. `*` means "any", except that
//! browsers refuse a literal wildcard alongside credentials, so with
//! credentials enabled a wildcard origin, method or header list mirrors the
//! request instead, and a wildcard exposed-header list is dropped.

use std::time::Duration;

use http::{HeaderName, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer, ExposeHeaders};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorsConfigError {
    #[error("Invalid CORS origin: {0}")]
    InvalidOrigin(String),

    #[error("Invalid CORS method: {0}")]
    InvalidMethod(String),

    #[error("Invalid CORS header name: {0}")]
    InvalidHeader(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsSettings {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: Duration,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            allowed_methods: split_list("GET,POST,PUT,DELETE,OPTIONS"),
            allowed_headers: vec!["*".to_string()],
            exposed_headers: vec!["Authorization".to_string()],
            allow_credentials: true,
            max_age: Duration::from_secs(3600),
        }
    }
}

/// Split a comma-separated setting, trimming items and dropping empties
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_wildcard(items: &[String]) -> bool {
    items.iter().any(|item| item == "*")
}

impl CorsSettings {
    pub fn to_layer(&self) -> Result<CorsLayer, CorsConfigError> {
        let credentials = self.allow_credentials;

        let origin = if is_wildcard(&self.allowed_origins) {
            if credentials {
                AllowOrigin::mirror_request()
            } else {
                AllowOrigin::any()
            }
        } else {
            let origins = self
                .allowed_origins
                .iter()
                .map(|o| {
                    HeaderValue::from_str(o).map_err(|_| CorsConfigError::InvalidOrigin(o.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(origins)
        };

        let methods = if is_wildcard(&self.allowed_methods) {
            if credentials {
                AllowMethods::mirror_request()
            } else {
                AllowMethods::any()
            }
        } else {
            let methods = self
                .allowed_methods
                .iter()
                .map(|m| {
                    Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                        .map_err(|_| CorsConfigError::InvalidMethod(m.clone()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowMethods::list(methods)
        };

        let headers = if is_wildcard(&self.allowed_headers) {
            if credentials {
                AllowHeaders::mirror_request()
            } else {
                AllowHeaders::any()
            }
        } else {
            AllowHeaders::list(parse_header_names(&self.allowed_headers)?)
        };

        let exposed = if is_wildcard(&self.exposed_headers) {
            if credentials {
                tracing::warn!("Wildcard exposed headers are ignored when credentials are allowed");
                ExposeHeaders::list(Vec::<HeaderName>::new())
            } else {
                ExposeHeaders::any()
            }
        } else {
            ExposeHeaders::list(parse_header_names(&self.exposed_headers)?)
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .expose_headers(exposed)
            .allow_credentials(credentials)
            .max_age(self.max_age))
    }
}

fn parse_header_names(items: &[String]) -> Result<Vec<HeaderName>, CorsConfigError> {
    items
        .iter()
        .map(|h| {
            HeaderName::from_bytes(h.as_bytes())
                .map_err(|_| CorsConfigError::InvalidHeader(h.clone()))
        })
        .collect()
}

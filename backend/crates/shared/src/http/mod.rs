//! HTTP glue shared by every router
//!
//! - [`extract`]: `Json` / `Path` extractors whose rejections are rendered as
//!   error envelopes instead of axum's plain-text bodies
//! - [`middleware`]: error-path stamping, request deadline, 404 fallback

pub mod extract;
pub mod middleware;

pub use extract::{Json, Path};

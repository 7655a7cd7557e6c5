//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::code::ErrorCode;
use super::kind::ErrorKind;
use crate::validation::FieldErrors;

/// Message returned to clients in place of any 5xx detail
pub const GENERIC_SERVER_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - HTTP ステータスの分類
/// * `code` - クライアントに返すエラーコード（`errorCode`）
/// * `message` - ユーザー向けのエラーメッセージ
/// * `validation_errors` - フィールド単位の検証エラー（`VALIDATION_ERROR` のみ）
/// * `source` - 元のエラー（オプション、デバッグ用）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, code::ErrorCode, kind::ErrorKind};
///
/// let err = AppError::not_found("Project not found with id: 7");
/// assert_eq!(err.code(), ErrorCode::ResourceNotFound);
///
/// let err = AppError::business(ErrorKind::Unauthorized, "Email or password is incorrect");
/// assert_eq!(err.status_code(), 401);
/// assert_eq!(err.code(), ErrorCode::BusinessError);
/// ```
pub struct AppError {
    kind: ErrorKind,
    code: ErrorCode,
    message: Cow<'static, str>,
    validation_errors: Option<FieldErrors>,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// アプリケーション結果型エイリアス
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    ///
    /// エラーコードは `kind` の既定値になります。
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            code: kind.default_code(),
            message: message.into(),
            validation_errors: None,
            source: None,
        }
    }

    /// 業務エラー（`BUSINESS_ERROR`）を任意のステータスで作成
    #[inline]
    pub fn business(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(kind, message).with_code(ErrorCode::BusinessError)
    }

    /// フィールド検証エラー（400 `VALIDATION_ERROR`）
    pub fn validation(errors: FieldErrors) -> Self {
        let mut err = Self::new(ErrorKind::BadRequest, "Validation failed")
            .with_code(ErrorCode::ValidationError);
        err.validation_errors = Some(errors);
        err
    }

    /// 型変換エラー（400 `TYPE_MISMATCH`）
    pub fn type_mismatch(value: impl fmt::Display, parameter: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::BadRequest,
            format!("Invalid value '{}' for parameter '{}'", value, parameter),
        )
        .with_code(ErrorCode::TypeMismatch)
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 400 Bad Request エラー
    #[inline]
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// 401 Unauthorized エラー
    #[inline]
    pub fn unauthorized(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// 403 Forbidden エラー
    #[inline]
    pub fn forbidden(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 409 Conflict エラー
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// 500 Internal Server Error
    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    /// 503 Service Unavailable エラー
    #[inline]
    pub fn service_unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::ServiceUnavailable, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// エラーコードを上書き
    #[inline]
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// 元のエラーを設定（デバッグ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// 内部メッセージ（ログ用、5xx でもそのまま）
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// クライアントに返すメッセージ
    ///
    /// サーバーエラーの詳細は外部に出さず、汎用メッセージに置き換えます。
    pub fn public_message(&self) -> &str {
        if self.is_server_error() {
            GENERIC_SERVER_ERROR_MESSAGE
        } else {
            &self.message
        }
    }

    #[inline]
    pub fn validation_errors(&self) -> Option<&FieldErrors> {
        self.validation_errors.as_ref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }

    #[inline]
    pub fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }

    /// `source` チェーンを連結した文字列（ログ出力用）
    pub fn source_chain(&self) -> String {
        let mut chain = Vec::new();
        let mut current = self.source();
        while let Some(err) = current {
            chain.push(err.to_string());
            current = err.source();
        }
        chain.join(": ")
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("code", &self.code);
        builder.field("message", &self.message);
        if let Some(errors) = &self.validation_errors {
            builder.field("validation_errors", errors);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::validation(errors)
    }
}

// ============================================================================
// Result extension traits
// ============================================================================

/// `Result<T, E>` を `AppResult<T>` に変換するための拡張トレイト
pub trait ResultExt<T, E> {
    /// エラーを `AppError` に変換し、指定した種別とメッセージでラップ
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn map_app_err(self, kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> AppResult<T>
    where
        E: Error + Send + Sync + 'static,
    {
        self.map_err(|e| AppError::new(kind, message).with_source(e))
    }
}

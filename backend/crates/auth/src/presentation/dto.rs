//! API DTOs (Data Transfer Objects)

use std::fmt;

use kernel::validation::{FieldErrors, Validator};
use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};

use crate::application::LoginOutput;

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let email = self.email.as_deref();
        let password = self.password.as_deref();

        let mut v = Validator::new();
        v.required("email", email).email("email", email);
        v.required("password", password)
            .max_chars("password", password, MAX_PASSWORD_LENGTH);
        v.finish()
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub full_name: String,
}

impl From<LoginOutput> for LoginResponse {
    fn from(output: LoginOutput) -> Self {
        Self {
            access_token: output.access_token,
            token_type: output.token_type.to_string(),
            expires_in: output.expires_in,
            full_name: output.full_name,
        }
    }
}

// ============================================================================
// Change Password
// ============================================================================

/// Change password request (camelCase keys are accepted too)
#[derive(Clone, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(alias = "currentPassword")]
    pub current_password: Option<String>,
    #[serde(alias = "newPassword")]
    pub new_password: Option<String>,
    #[serde(alias = "confirmPassword")]
    pub confirm_password: Option<String>,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let new_password = self.new_password.as_deref();

        let mut v = Validator::new();
        v.required("current_password", self.current_password.as_deref());
        v.required("new_password", new_password).chars_between(
            "new_password",
            new_password,
            MIN_PASSWORD_LENGTH,
            MAX_PASSWORD_LENGTH,
        );
        v.required("confirm_password", self.confirm_password.as_deref());
        v.finish()
    }
}

impl fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangePasswordRequest").finish_non_exhaustive()
    }
}

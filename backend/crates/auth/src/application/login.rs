//! Login Use Case
//!
//! Verifies the admin credential and issues a bearer token.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordHasher};
use platform::token::TokenService;

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Token type reported to clients
pub const TOKEN_TYPE: &str = "Bearer";

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds
    pub expires_in: u64,
    /// Owner profile name, or the credential email when there is none
    pub full_name: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    tokens: Arc<TokenService>,
    hasher: Arc<PasswordHasher>,
}

impl<R> LoginUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, tokens: Arc<TokenService>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            repo,
            tokens,
            hasher,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let password = ClearTextPassword::for_verification(input.password);

        // Malformed emails cannot match a stored credential
        let credential = match Email::new(input.email) {
            Ok(email) => self.repo.find_active_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(credential) = credential.filter(|c| c.can_login()) else {
            self.hasher.verify_dummy(&password);
            return Err(AuthError::InvalidCredentials);
        };

        if !credential.has_password() {
            self.hasher.verify_dummy(&password);
            return Err(AuthError::InvalidCredentials);
        }

        if !self.hasher.verify(&password, &credential.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self
            .tokens
            .issue(credential.email.as_str(), Some(credential.role.code()))?;

        let full_name = self
            .repo
            .find_owner_display_name()
            .await?
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| credential.email.to_string());

        tracing::info!(
            credential_id = %credential.id,
            role = %credential.role,
            "Admin logged in"
        );

        Ok(LoginOutput {
            access_token,
            token_type: TOKEN_TYPE,
            expires_in: self.tokens.expires_in_secs(),
            full_name,
        })
    }
}

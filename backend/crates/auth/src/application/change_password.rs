//! Change Password Use Case
//!
//! Rotates the password of the active admin credential.

use std::sync::Arc;

use kernel::audit::Actor;
use platform::password::{ClearTextPassword, PasswordHasher};

use crate::domain::repository::CredentialRepository;
use crate::error::{AuthError, AuthResult};

/// Change password input
pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Change password use case
pub struct ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    hasher: Arc<PasswordHasher>,
}

impl<R> ChangePasswordUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, hasher: Arc<PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Checks run in order: credential exists, current password, confirmation,
    /// difference from current, policy.
    pub async fn execute(&self, input: ChangePasswordInput, actor: &Actor) -> AuthResult<()> {
        let credential = self
            .repo
            .find_first_active()
            .await?
            .ok_or(AuthError::CredentialNotFound)?;

        let current = ClearTextPassword::for_verification(input.current_password);
        if !self.hasher.verify(&current, &credential.password_hash) {
            return Err(AuthError::CurrentPasswordIncorrect);
        }

        if input.new_password != input.confirm_password {
            return Err(AuthError::PasswordConfirmationMismatch);
        }

        let new_password = ClearTextPassword::new(input.new_password)?;
        if self.hasher.verify(&new_password, &credential.password_hash) {
            return Err(AuthError::PasswordUnchanged);
        }

        let hashed = self.hasher.hash(&new_password)?;
        self.repo
            .update_password(credential.id, hashed.as_phc_string(), actor)
            .await?;

        tracing::info!(
            credential_id = %credential.id,
            updated_by = %actor,
            "Admin password changed"
        );

        Ok(())
    }
}

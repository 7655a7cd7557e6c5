//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::audit::Actor;
use kernel::id::AdminCredentialId;

use crate::domain::entity::admin_credential::{AdminCredential, NewAdminCredential};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// Admin credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Active, non-deleted credential with this email
    async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<AdminCredential>>;

    /// Lowest-id active credential
    async fn find_first_active(&self) -> AuthResult<Option<AdminCredential>>;

    /// Number of active credentials (startup singleton check)
    async fn count_active(&self) -> AuthResult<i64>;

    /// Insert a credential (bootstrap seeding)
    async fn insert(
        &self,
        credential: NewAdminCredential,
        actor: &Actor,
    ) -> AuthResult<AdminCredential>;

    /// Replace the stored hash; bumps `updated_at` / `updated_by`
    async fn update_password(
        &self,
        id: AdminCredentialId,
        password_hash: &str,
        actor: &Actor,
    ) -> AuthResult<()>;

    /// Owner profile's full name, shown after login
    async fn find_owner_display_name(&self) -> AuthResult<Option<String>>;
}

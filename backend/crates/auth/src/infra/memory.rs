//! In-Memory Repository Implementation
//!
//! Same contract as the PostgreSQL repository; used by tests and local runs
//! without a database.

use std::sync::Arc;

use chrono::Utc;
use kernel::audit::{Actor, Audit};
use kernel::id::AdminCredentialId;
use tokio::sync::RwLock;

use crate::domain::entity::admin_credential::{AdminCredential, NewAdminCredential};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    credentials: Vec<AdminCredential>,
    next_id: i64,
    owner_display_name: Option<String>,
}

/// `tokio::sync::RwLock`-backed credential repository
#[derive(Clone, Default)]
pub struct InMemoryCredentialRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name returned by `find_owner_display_name`
    pub async fn set_owner_display_name(&self, name: Option<String>) {
        self.state.write().await.owner_display_name = name;
    }

    /// Deactivate a credential (tests)
    pub async fn deactivate(&self, id: AdminCredentialId) {
        let mut state = self.state.write().await;
        if let Some(credential) = state.credentials.iter_mut().find(|c| c.id == id) {
            credential.is_active = false;
        }
    }
}

fn is_usable(credential: &AdminCredential) -> bool {
    credential.is_active && !credential.audit.is_deleted
}

impl CredentialRepository for InMemoryCredentialRepository {
    async fn find_active_by_email(&self, email: &Email) -> AuthResult<Option<AdminCredential>> {
        let state = self.state.read().await;
        Ok(state
            .credentials
            .iter()
            .find(|c| is_usable(c) && c.email == *email)
            .cloned())
    }

    async fn find_first_active(&self) -> AuthResult<Option<AdminCredential>> {
        let state = self.state.read().await;
        Ok(state
            .credentials
            .iter()
            .filter(|c| is_usable(c))
            .min_by_key(|c| c.id)
            .cloned())
    }

    async fn count_active(&self) -> AuthResult<i64> {
        let state = self.state.read().await;
        Ok(state.credentials.iter().filter(|c| is_usable(c)).count() as i64)
    }

    async fn insert(
        &self,
        credential: NewAdminCredential,
        actor: &Actor,
    ) -> AuthResult<AdminCredential> {
        let mut state = self.state.write().await;

        if state.credentials.iter().any(|c| c.email == credential.email) {
            return Err(AuthError::Internal(format!(
                "Admin credential already exists for {}",
                credential.email
            )));
        }

        state.next_id += 1;
        let created = AdminCredential {
            id: AdminCredentialId::new(state.next_id),
            email: credential.email,
            password_hash: credential.password_hash,
            role: credential.role,
            is_active: true,
            audit: Audit::new(actor, Utc::now()),
        };
        state.credentials.push(created.clone());

        Ok(created)
    }

    async fn update_password(
        &self,
        id: AdminCredentialId,
        password_hash: &str,
        actor: &Actor,
    ) -> AuthResult<()> {
        let mut state = self.state.write().await;
        let credential = state
            .credentials
            .iter_mut()
            .find(|c| c.id == id && !c.audit.is_deleted)
            .ok_or(AuthError::CredentialNotFound)?;

        credential.password_hash = password_hash.to_string();
        credential.audit.touch(actor, Utc::now());

        Ok(())
    }

    async fn find_owner_display_name(&self) -> AuthResult<Option<String>> {
        Ok(self.state.read().await.owner_display_name.clone())
    }
}

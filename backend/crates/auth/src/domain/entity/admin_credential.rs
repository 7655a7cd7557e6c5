//! AdminCredential Entity
//!
//! Login credential of the portfolio owner. Exactly one active row is
//! expected; the password hash never leaves this crate.

use std::fmt;

use kernel::audit::Audit;
use kernel::id::AdminCredentialId;
use kernel::principal::Role;

use crate::domain::value_object::email::Email;

/// Admin credential entity
#[derive(Clone)]
pub struct AdminCredential {
    pub id: AdminCredentialId,
    pub email: Email,
    /// PHC string; empty means "no usable password"
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub audit: Audit,
}

impl AdminCredential {
    /// Whether a password could ever verify against this credential
    pub fn has_password(&self) -> bool {
        !self.password_hash.trim().is_empty()
    }

    /// Usable for login
    pub fn can_login(&self) -> bool {
        self.is_active && !self.audit.is_deleted
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[HASH]")
            .field("role", &self.role)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Fields of a credential about to be inserted
#[derive(Clone)]
pub struct NewAdminCredential {
    pub email: Email,
    pub password_hash: String,
    pub role: Role,
}

impl fmt::Debug for NewAdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAdminCredential")
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

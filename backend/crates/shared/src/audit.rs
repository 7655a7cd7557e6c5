//! Audit mixin
//!
//! Every persisted entity carries creation/update timestamps, the acting
//! principal for both, and a soft-delete flag. The acting principal is passed
//! explicitly into each write; there is no ambient "current user".

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::principal::Principal;

/// Sentinel written when no principal is involved (seeding, migrations)
pub const SYSTEM_ACTOR: &str = "SYSTEM";

/// Identity recorded in `created_by` / `updated_by`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor(String);

impl Actor {
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }

    pub fn system() -> Self {
        Self(SYSTEM_ACTOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Principal> for Actor {
    fn from(principal: &Principal) -> Self {
        Self::new(principal.subject())
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Audit columns shared by every entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
    pub is_deleted: bool,
}

impl Audit {
    /// Columns for a row inserted now by `actor`
    pub fn new(actor: &Actor, now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            created_by: actor.as_str().to_string(),
            updated_by: actor.as_str().to_string(),
            is_deleted: false,
        }
    }

    /// Record an update; `updated_at` never moves before `created_at`
    pub fn touch(&mut self, actor: &Actor, now: DateTime<Utc>) {
        self.updated_at = now.max(self.created_at);
        self.updated_by = actor.as_str().to_string();
    }

    /// Soft delete. Repeating it only refreshes the update columns.
    pub fn mark_deleted(&mut self, actor: &Actor, now: DateTime<Utc>) {
        self.is_deleted = true;
        self.touch(actor, now);
    }
}

//! Email Value Object
//!
//! Login identifier of the admin credential. Stored and compared in
//! lower case so lookups are case-insensitive.

use derive_more::Display;
use kernel::validation::is_well_formed_email;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid email address")]
pub struct InvalidEmail;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    pub fn new(email: impl Into<String>) -> Result<Self, InvalidEmail> {
        let email = email.into().trim().to_lowercase();

        if !is_well_formed_email(&email) {
            return Err(InvalidEmail);
        }

        Ok(Self(email))
    }

    /// Create from database value (already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = InvalidEmail;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

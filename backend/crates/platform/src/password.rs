//! Password Hashing and Verification
//!
//! Credential handling for the administrator account:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Constant-time comparison (inside `argon2`)
//! - Dummy verification so that unknown accounts cost the same as known ones
//!
//! ## Security Features
//! - Stored hashes are PHC strings, so cost parameters travel with the hash
//! - Verification of a malformed stored hash is a mismatch, never a panic
//! - Debug output of clear text is redacted

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length for newly chosen passwords
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Maximum password length for newly chosen passwords
pub const MAX_PASSWORD_LENGTH: usize = 100;

/// Password hashed once at start-up and verified against when no account matches
const DUMMY_PASSWORD: &str = "dummy-password-for-timing-equalization";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Argon2 cost parameters were rejected
    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("my_secure_password".to_string()).unwrap();
/// // Password is automatically zeroized when dropped
/// # drop(password);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with policy validation
    ///
    /// Used for passwords that are about to be stored:
    /// - [`MIN_PASSWORD_LENGTH`] to [`MAX_PASSWORD_LENGTH`] characters
    /// - No control characters
    /// - Not empty/whitespace only
    ///
    /// Unicode is normalized using NFKC before validation.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let normalized = Self::normalize(raw);

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points (not bytes)
        let char_count = normalized.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        // Control characters except space, tab, newline
        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Wrap a submitted password for comparison against a stored hash
    ///
    /// No policy is applied: a password that was valid when stored must stay
    /// verifiable even if the policy tightens later.
    pub fn for_verification(raw: String) -> Self {
        Self(Self::normalize(raw))
    }

    fn normalize(mut raw: String) -> String {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        normalized
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm identifier, version, cost parameters,
/// salt and hash, so it is self-describing for later verification.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    pub fn into_phc_string(self) -> String {
        self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Password Hasher
// ============================================================================

/// Argon2id hasher with a pre-computed dummy hash
///
/// Build once at start-up and share (it is cheap to clone).
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    dummy: HashedPassword,
}

impl PasswordHasher {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    pub fn new() -> Result<Self, PasswordHashError> {
        Self::from_argon2(Argon2::default())
    }

    /// Custom cost (memory in KiB, iterations, lanes)
    ///
    /// Low costs are only meant for tests.
    pub fn with_cost(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, PasswordHashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParameters(e.to_string()))?;
        Self::from_argon2(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }

    fn from_argon2(argon2: Argon2<'static>) -> Result<Self, PasswordHashError> {
        let dummy = hash_with(
            &argon2,
            &ClearTextPassword::for_verification(DUMMY_PASSWORD.to_string()),
        )?;
        Ok(Self { argon2, dummy })
    }

    /// Hash the password with a fresh 128-bit salt
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        hash_with(&self.argon2, password)
    }

    /// Verify a password against a stored PHC string
    ///
    /// Returns `false` for a wrong password and for an unparsable stored hash.
    pub fn verify(&self, password: &ClearTextPassword, stored: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };

        // Cost parameters come from the stored hash
        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// Spend one verification worth of work and discard the result
    pub fn verify_dummy(&self, password: &ClearTextPassword) {
        let _ = self.verify(password, self.dummy.as_phc_string());
    }
}

impl fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

fn hash_with(
    argon2: &Argon2<'static>,
    password: &ClearTextPassword,
) -> Result<HashedPassword, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(HashedPassword {
        hash: hash.to_string(),
    })
}

// ============================================================================
// Tests
// ============================================================================

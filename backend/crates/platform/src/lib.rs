//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64 / Base64url)
//! - Password hashing (Argon2id)
//! - Signed bearer tokens (HMAC-SHA JWS)
//! - Bounded in-process caches with hit/miss statistics
//! - CORS layer construction from comma-separated settings

pub mod cache;
pub mod cors;
pub mod crypto;
pub mod password;
pub mod token;

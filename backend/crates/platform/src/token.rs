//! Signed Bearer Tokens
//!
//! HMAC-signed JWTs issued and checked through `jsonwebtoken`. The algorithm
//! follows the key length:
//!
//! | key bytes | algorithm |
//! |-----------|-----------|
//! | >= 64     | HS512     |
//! | >= 48     | HS384     |
//! | >= 32     | HS256     |
//!
//! Keys shorter than 32 bytes are rejected at construction. A key also
//! verifies tokens signed with any weaker HMAC variant it is long enough for.

use std::{fmt, time::Duration};

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{from_base64, random_bytes};

/// Shortest accepted signing key
pub const MIN_KEY_BYTES: usize = 32;

// ============================================================================
// Errors
// ============================================================================

/// Signing key rejected at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenKeyError {
    #[error("JWT secret key is empty")]
    Empty,

    #[error("JWT secret key must be at least {min} bytes (got {actual})")]
    TooShort { min: usize, actual: usize },
}

/// Reasons a bearer token is not accepted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token is empty")]
    Empty,

    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature does not match")]
    BadSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Unsupported token algorithm: {0}")]
    Unsupported(String),

    #[error("Token could not be signed")]
    Signing,
}

impl From<JwtError> for TokenError {
    fn from(err: JwtError) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::BadSignature,
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self::Unsupported("unknown".to_string()),
            _ => Self::Malformed,
        }
    }
}

// ============================================================================
// Algorithm
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    HS256,
    HS384,
    HS512,
}

impl Algorithm {
    const ALL: [Self; 3] = [Self::HS256, Self::HS384, Self::HS512];

    pub const fn min_key_bytes(self) -> usize {
        match self {
            Self::HS256 => 32,
            Self::HS384 => 48,
            Self::HS512 => 64,
        }
    }

    /// Strongest algorithm the key length supports
    pub const fn for_key_len(len: usize) -> Option<Self> {
        if len >= 64 {
            Some(Self::HS512)
        } else if len >= 48 {
            Some(Self::HS384)
        } else if len >= 32 {
            Some(Self::HS256)
        } else {
            None
        }
    }

    /// Every variant a key of `len` bytes can verify
    fn accepted_for(len: usize) -> Vec<jsonwebtoken::Algorithm> {
        Self::ALL
            .into_iter()
            .filter(|alg| alg.min_key_bytes() <= len)
            .map(Into::into)
            .collect()
    }
}

impl From<Algorithm> for jsonwebtoken::Algorithm {
    fn from(alg: Algorithm) -> Self {
        match alg {
            Algorithm::HS256 => Self::HS256,
            Algorithm::HS384 => Self::HS384,
            Algorithm::HS512 => Self::HS512,
        }
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Registered claims plus the role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Claims {
    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }
}

// ============================================================================
// Signing key
// ============================================================================

#[derive(Zeroize, ZeroizeOnDrop)]
struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Base64 when it decodes to a non-empty value, raw UTF-8 bytes otherwise
    fn from_secret(secret: &str) -> Self {
        let trimmed = secret.trim();
        match from_base64(trimmed) {
            Ok(bytes) if !bytes.is_empty() => Self(bytes),
            _ => Self(trimmed.as_bytes().to_vec()),
        }
    }
}

// ============================================================================
// Token Service
// ============================================================================

/// Issues and validates bearer tokens
pub struct TokenService {
    key: SigningKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Build from the configured secret (Base64 or raw text)
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, TokenKeyError> {
        if secret.trim().is_empty() {
            return Err(TokenKeyError::Empty);
        }
        Self::from_key(SigningKey::from_secret(secret), ttl)
    }

    /// Build from raw key bytes
    pub fn from_key_bytes(bytes: Vec<u8>, ttl: Duration) -> Result<Self, TokenKeyError> {
        if bytes.is_empty() {
            return Err(TokenKeyError::Empty);
        }
        Self::from_key(SigningKey(bytes), ttl)
    }

    /// Fresh random 64-byte key (HS512); tokens die with the process
    pub fn random(ttl: Duration) -> Self {
        Self {
            key: SigningKey(random_bytes(64)),
            algorithm: Algorithm::HS512,
            ttl,
        }
    }

    fn from_key(key: SigningKey, ttl: Duration) -> Result<Self, TokenKeyError> {
        let actual = key.0.len();
        let algorithm = Algorithm::for_key_len(actual).ok_or(TokenKeyError::TooShort {
            min: MIN_KEY_BYTES,
            actual,
        })?;
        Ok(Self {
            key,
            algorithm,
            ttl,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Token lifetime in whole seconds (login response `expires_in`)
    pub fn expires_in_secs(&self) -> u64 {
        self.ttl.as_secs()
    }

    /// Issue a token for `subject` valid from now
    pub fn issue(&self, subject: &str, role: Option<&str>) -> Result<String, TokenError> {
        self.issue_at(subject, role, Utc::now())
    }

    pub fn issue_at(
        &self,
        subject: &str,
        role: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let ttl_ms = i64::try_from(self.ttl.as_millis()).map_err(|_| TokenError::Signing)?;
        let expires_at_ms = now
            .timestamp_millis()
            .checked_add(ttl_ms)
            .ok_or(TokenError::Signing)?;

        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at_ms.div_euclid(1000),
            role: role.map(str::to_string),
        };

        jsonwebtoken::encode(
            &Header::new(self.algorithm.into()),
            &claims,
            &EncodingKey::from_secret(&self.key.0),
        )
        .map_err(|err| {
            tracing::error!(error = %err, "Failed to sign token");
            TokenError::Signing
        })
    }

    /// Validate signature and expiry, returning the claims
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        self.parse_at(token, Utc::now())
    }

    pub fn parse_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let header = jsonwebtoken::decode_header(token)?;
        let accepted = Algorithm::accepted_for(self.key.0.len());
        if !accepted.contains(&header.alg) {
            return Err(TokenError::Unsupported(format!("{:?}", header.alg)));
        }

        // Expiry is checked against `now` below, with no leeway
        let mut validation = Validation::new(self.algorithm.into());
        validation.algorithms = accepted;
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.key.0),
            &validation,
        )?
        .claims;

        if claims.sub.is_empty() {
            return Err(TokenError::Malformed);
        }

        if claims.exp <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// `true` iff [`TokenService::parse`] would succeed
    pub fn is_valid(&self, token: &str) -> bool {
        self.parse(token).is_ok()
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::to_base64;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::TimeZone;

    const DAY: Duration = Duration::from_secs(86_400);

    fn service() -> TokenService {
        TokenService::from_key_bytes(vec![7u8; 64], DAY).unwrap()
    }

    fn segment(json: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(json)
    }

    #[test]
    fn test_algorithm_follows_key_length() {
        let svc = |len| TokenService::from_key_bytes(vec![1u8; len], DAY);
        assert_eq!(svc(32).unwrap().algorithm(), Algorithm::HS256);
        assert_eq!(svc(47).unwrap().algorithm(), Algorithm::HS256);
        assert_eq!(svc(48).unwrap().algorithm(), Algorithm::HS384);
        assert_eq!(svc(64).unwrap().algorithm(), Algorithm::HS512);
        assert_eq!(
            svc(31).unwrap_err(),
            TokenKeyError::TooShort {
                min: 32,
                actual: 31
            }
        );
    }

    #[test]
    fn test_secret_accepts_base64_and_raw_text() {
        let base64_secret = to_base64(&[9u8; 48]);
        let svc = TokenService::new(&base64_secret, DAY).unwrap();
        assert_eq!(svc.algorithm(), Algorithm::HS384);

        let raw = "this is a raw secret that is long enough!!";
        let svc = TokenService::new(raw, DAY).unwrap();
        assert_eq!(svc.algorithm(), Algorithm::HS256);

        assert_eq!(TokenService::new("   ", DAY).unwrap_err(), TokenKeyError::Empty);
    }

    #[test]
    fn test_issue_and_parse() {
        let svc = service();
        let now = Utc::now();
        let token = svc.issue_at("admin@example.com", Some("ADMIN"), now).unwrap();

        assert_eq!(token.split('.').count(), 3);
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.alg, jsonwebtoken::Algorithm::HS512);

        let claims = svc.parse_at(&token, now).unwrap();
        assert_eq!(claims.subject(), "admin@example.com");
        assert_eq!(claims.role(), Some("ADMIN"));
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp, (now.timestamp_millis() + 86_400_000).div_euclid(1000));
        assert!(svc.is_valid(&token));
    }

    #[test]
    fn test_expired_token() {
        let svc = service();
        let issued = Utc::now() - chrono::Duration::days(2);
        let token = svc.issue_at("admin@example.com", None, issued).unwrap();

        assert_eq!(svc.parse(&token), Err(TokenError::Expired));
        assert!(!svc.is_valid(&token));
    }

    #[test]
    fn test_token_is_invalid_at_exact_expiry() {
        let svc = TokenService::from_key_bytes(vec![7u8; 64], Duration::from_secs(60)).unwrap();
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let token = svc.issue_at("a@b.co", None, now).unwrap();

        let just_before = now + chrono::Duration::seconds(59);
        let at_expiry = now + chrono::Duration::seconds(60);
        assert!(svc.parse_at(&token, just_before).is_ok());
        assert_eq!(svc.parse_at(&token, at_expiry), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let svc = service();
        let token = svc.issue("admin@example.com", None).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        let forged_claims = Claims {
            sub: "intruder@example.com".to_string(),
            iat: 0,
            exp: i64::MAX / 2,
            role: None,
        };
        let forged_payload = segment(&serde_json::to_vec(&forged_claims).unwrap());
        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);

        assert_eq!(svc.parse(&forged), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_token_from_other_key_is_rejected() {
        let other = TokenService::from_key_bytes(vec![8u8; 64], DAY).unwrap();
        let token = other.issue("admin@example.com", None).unwrap();
        assert_eq!(service().parse(&token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_malformed_tokens() {
        let svc = service();
        assert_eq!(svc.parse(""), Err(TokenError::Empty));
        assert_eq!(svc.parse("   "), Err(TokenError::Empty));
        assert_eq!(svc.parse("abc"), Err(TokenError::Malformed));
        assert_eq!(svc.parse("a.b.c.d"), Err(TokenError::Malformed));
        assert_eq!(svc.parse("!!.??.##"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_unsigned_token_is_rejected() {
        let header = segment(br#"{"alg":"none"}"#);
        let payload = segment(br#"{"sub":"a","iat":0,"exp":9999999999}"#);
        let token = format!("{header}.{payload}.");
        assert!(service().parse(&token).is_err());
    }

    #[test]
    fn test_unsupported_algorithm() {
        let payload = segment(br#"{"sub":"a","iat":0,"exp":9999999999}"#);

        let rsa = format!("{}.{payload}.sig", segment(br#"{"alg":"RS256"}"#));
        assert_eq!(
            service().parse(&rsa),
            Err(TokenError::Unsupported("RS256".to_string()))
        );

        // A 32-byte key is too short to check an HS512 signature
        let short = TokenService::from_key_bytes(vec![5u8; 32], DAY).unwrap();
        let hs512 = format!("{}.{payload}.sig", segment(br#"{"alg":"HS512"}"#));
        assert_eq!(
            short.parse(&hs512),
            Err(TokenError::Unsupported("HS512".to_string()))
        );
    }

    #[test]
    fn test_weaker_algorithm_with_same_key_is_accepted() {
        // A 64-byte key can still verify HS256 tokens issued elsewhere with it
        let key = vec![3u8; 64];
        let claims = Claims {
            sub: "a@b.co".to_string(),
            iat: 0,
            exp: 9_999_999_999,
            role: None,
        };
        let token = jsonwebtoken::encode(
            &Header::new(jsonwebtoken::Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&key),
        )
        .unwrap();

        let svc = TokenService::from_key_bytes(key, DAY).unwrap();
        let parsed = svc.parse(&token).unwrap();
        assert_eq!(parsed.subject(), "a@b.co");
        assert_eq!(parsed.role(), None);
    }

    #[test]
    fn test_empty_subject_is_rejected() {
        let svc = service();
        let token = svc.issue("", None).unwrap();
        assert_eq!(svc.parse(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn test_random_service_round_trip() {
        let svc = TokenService::random(DAY);
        assert_eq!(svc.algorithm(), Algorithm::HS512);
        let token = svc.issue("admin@example.com", None).unwrap();
        assert!(svc.is_valid(&token));
        assert_eq!(svc.expires_in_secs(), 86_400);
    }

    #[test]
    fn test_debug_redacts_key() {
        let output = format!("{:?}", service());
        assert!(output.contains("REDACTED"));
    }
}

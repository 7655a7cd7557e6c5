//! Application configuration
//!
//! Read once at startup from the process environment (after `.env` has been
//! loaded). Every value has a default except `DATABASE_URL` and, in release
//! builds, `JWT_SECRET_KEY`.

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use platform::cache::{CacheSettings, DEFAULT_CACHE_MAX_CAPACITY, DEFAULT_CACHE_TTL_SECONDS};
use platform::cors::{CorsSettings, split_list};
use platform::token::TokenService;

pub const DEFAULT_LOG_FILTER: &str = "api=info,auth=info,portfolio=info,tower_http=info";

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_JWT_EXPIRATION_MS: u64 = 86_400_000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Seeding inputs for an empty database
#[derive(Clone, Default)]
pub struct BootstrapConfig {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub owner_full_name: Option<String>,
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[REDACTED]"))
            .field("owner_full_name", &self.owner_full_name)
            .finish()
    }
}

/// Settings consumed by `build_app`
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub cors: CorsSettings,
    pub request_timeout: Duration,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cors: CorsSettings::default(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
        }
    }
}

pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    jwt_secret: Option<String>,
    pub jwt_expiration: Duration,
    pub database_url: String,
    pub database_max_connections: u32,
    pub cache: CacheSettings,
    pub http: HttpSettings,
    pub bootstrap: BootstrapConfig,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "[REDACTED]"))
            .field("jwt_expiration", &self.jwt_expiration)
            .field("database_max_connections", &self.database_max_connections)
            .field("cache", &self.cache)
            .field("http", &self.http)
            .field("bootstrap", &self.bootstrap)
            .finish()
    }
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = parse_or(&get, "SERVER_HOST", DEFAULT_HOST.parse()?)?;
        let port = parse_or(&get, "SERVER_PORT", DEFAULT_PORT)?;

        let jwt_secret = get("JWT_SECRET_KEY");
        if jwt_secret.is_none() && !cfg!(debug_assertions) {
            bail!("JWT_SECRET_KEY must be set in release builds");
        }
        let jwt_expiration = Duration::from_millis(parse_or(
            &get,
            "JWT_EXPIRATION_MS",
            DEFAULT_JWT_EXPIRATION_MS,
        )?);
        if jwt_expiration.is_zero() {
            bail!("JWT_EXPIRATION_MS must be greater than 0");
        }

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections =
            parse_or(&get, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let cache = CacheSettings {
            max_capacity: parse_or(&get, "CACHE_MAX_CAPACITY", DEFAULT_CACHE_MAX_CAPACITY)?,
            time_to_live: Duration::from_secs(parse_or(
                &get,
                "CACHE_TTL_SECONDS",
                DEFAULT_CACHE_TTL_SECONDS,
            )?),
        };

        let defaults = CorsSettings::default();
        let list_or = |key: &str, fallback: Vec<String>| match get(key) {
            Some(raw) => split_list(&raw),
            None => fallback,
        };
        let cors = CorsSettings {
            allowed_origins: list_or("CORS_ALLOWED_ORIGINS", defaults.allowed_origins),
            allowed_methods: list_or("CORS_ALLOWED_METHODS", defaults.allowed_methods),
            allowed_headers: list_or("CORS_ALLOWED_HEADERS", defaults.allowed_headers),
            exposed_headers: list_or("CORS_EXPOSED_HEADERS", defaults.exposed_headers),
            allow_credentials: parse_or(
                &get,
                "CORS_ALLOW_CREDENTIALS",
                defaults.allow_credentials,
            )?,
            max_age: Duration::from_secs(parse_or(
                &get,
                "CORS_MAX_AGE",
                defaults.max_age.as_secs(),
            )?),
        };

        let request_timeout = Duration::from_secs(parse_or(
            &get,
            "REQUEST_TIMEOUT_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?);

        let bootstrap = BootstrapConfig {
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
            owner_full_name: get("OWNER_FULL_NAME"),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_expiration,
            database_url,
            database_max_connections,
            cache,
            http: HttpSettings {
                cors,
                request_timeout,
            },
            bootstrap,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Token service for the configured key; debug builds fall back to a random key
    pub fn token_service(&self) -> anyhow::Result<TokenService> {
        match &self.jwt_secret {
            Some(secret) => TokenService::new(secret, self.jwt_expiration)
                .context("Invalid JWT_SECRET_KEY"),
            None => {
                tracing::warn!(
                    "JWT_SECRET_KEY is not set; using a random key, tokens will not survive a restart"
                );
                Ok(TokenService::random(self.jwt_expiration))
            }
        }
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", key, raw, e)),
        None => Ok(default),
    }
}

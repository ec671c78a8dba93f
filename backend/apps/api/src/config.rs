//! Server Configuration
//!
//! Read once at startup from the process environment (`.env` is loaded
//! first by `main`).

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::SameSite;
use platform::password::{HashParams, PasswordHasher};

const DEFAULT_PORT: u16 = 5001;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_SESSION_TTL_SECS: u64 = 24 * 3600;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub production: bool,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_connections =
            parse_or(get("DATABASE_MAX_CONNECTIONS"), DEFAULT_MAX_CONNECTIONS)
                .context("DATABASE_MAX_CONNECTIONS")?;
        let port = parse_or(get("PORT"), DEFAULT_PORT).context("PORT")?;

        let production = get("APP_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();

        let mut auth = if production {
            AuthConfig::default()
        } else {
            AuthConfig::development()
        };

        match get("SESSION_SECRET") {
            Some(encoded) => auth.session_secret = decode_secret(&encoded)?,
            None if production => bail!("SESSION_SECRET must be set in production"),
            None => {}
        }

        if let Some(name) = get("SESSION_COOKIE_NAME") {
            auth.session_cookie_name = name;
        }
        auth.session_ttl = Duration::from_secs(
            parse_or(get("SESSION_TTL_SECS"), DEFAULT_SESSION_TTL_SECS)
                .context("SESSION_TTL_SECS")?,
        );
        auth.session_idle_timeout = get("SESSION_IDLE_TIMEOUT_SECS")
            .map(|v| v.trim().parse::<u64>().map(Duration::from_secs))
            .transpose()
            .context("SESSION_IDLE_TIMEOUT_SECS")?;

        if let Some(policy) = get("COOKIE_SAME_SITE") {
            auth.cookie_same_site = policy.parse::<SameSite>().map_err(anyhow::Error::msg)?;
        }

        let defaults = HashParams::default();
        let params = HashParams {
            memory_kib: parse_or(get("PASSWORD_MEMORY_KIB"), defaults.memory_kib)
                .context("PASSWORD_MEMORY_KIB")?,
            iterations: parse_or(get("PASSWORD_ITERATIONS"), defaults.iterations)
                .context("PASSWORD_ITERATIONS")?,
            parallelism: parse_or(get("PASSWORD_PARALLELISM"), defaults.parallelism)
                .context("PASSWORD_PARALLELISM")?,
        };
        if production && !params.meets_baseline() {
            bail!(
                "password hashing parameters below the Argon2id baseline (m={} KiB, t={})",
                params.memory_kib,
                params.iterations
            );
        }
        auth.password_hasher =
            PasswordHasher::new(params).context("invalid password hashing parameters")?;

        Ok(Self {
            database_url,
            database_max_connections,
            port,
            production,
            frontend_origins,
            auth,
        })
    }
}

fn parse_or<T>(raw: Option<String>, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(v) => Ok(v.trim().parse()?),
        None => Ok(default),
    }
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = platform::crypto::from_base64(encoded.trim())
        .context("SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))
}

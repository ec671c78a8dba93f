//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::PasswordHasher;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Key for the token digest stored server-side (32 bytes)
    pub session_secret: [u8; 32],
    /// Absolute session lifetime
    pub session_ttl: Duration,
    /// Sessions unused for this long are dropped. `None` disables the
    /// check and the per-request activity write.
    pub session_idle_timeout: Option<Duration>,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Argon2id hasher with the configured work factor
    pub password_hasher: PasswordHasher,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "alignify_session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600), // 24 hours
            session_idle_timeout: None,
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_hasher: PasswordHasher::default(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&platform::crypto::random_bytes(32));
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Cookie attributes for the session cookie.
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(i64::try_from(self.session_ttl.as_secs()).unwrap_or(i64::MAX)),
        }
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX)
    }

    pub fn idle_timeout_chrono(&self) -> Option<chrono::Duration> {
        self.session_idle_timeout
            .map(|d| chrono::Duration::from_std(d).unwrap_or(chrono::Duration::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_config() {
        let config = AuthConfig::development();
        assert!(!config.cookie_secure);
        assert_ne!(config.session_secret, [0u8; 32]);
        assert_ne!(config.session_secret, AuthConfig::development().session_secret);
    }

    #[test]
    fn test_cookie_config_follows_auth_config() {
        let config = AuthConfig {
            cookie_same_site: SameSite::None,
            cookie_secure: false,
            ..AuthConfig::development()
        };
        let cookie = config.cookie_config().build_set_cookie("t");

        assert!(cookie.starts_with("alignify_session=t"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(cookie.contains("SameSite=None"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_huge_ttl_keeps_positive_max_age() {
        let config = AuthConfig {
            session_ttl: Duration::from_secs(u64::MAX),
            ..AuthConfig::development()
        };
        assert_eq!(config.cookie_config().max_age_secs, Some(i64::MAX));
        assert_eq!(config.session_ttl_chrono(), chrono::Duration::MAX);
    }
}

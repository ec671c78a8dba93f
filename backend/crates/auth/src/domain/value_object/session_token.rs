//! Session Token Value Object
//!
//! The opaque bearer value stored in the session cookie: 32 bytes from the
//! OS CSPRNG, base64url without padding. The server only ever persists the
//! keyed digest of a token, never the token itself.

use std::fmt;

use platform::crypto;

/// Random bytes per token.
pub const SESSION_TOKEN_BYTES: usize = 32;

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh random token.
    pub fn generate() -> Self {
        Self(crypto::random_token(SESSION_TOKEN_BYTES))
    }

    /// Accept a cookie value only if it has the exact shape of an issued
    /// token. Anything else is treated as "no session" without touching the
    /// store.
    pub fn parse(raw: &str) -> Option<Self> {
        match crypto::from_base64url(raw) {
            Ok(bytes) if bytes.len() == SESSION_TOKEN_BYTES => Some(Self(raw.to_string())),
            _ => None,
        }
    }

    /// HMAC-SHA256 of the token under the server's session secret.
    pub fn digest(&self, secret: &[u8; 32]) -> Vec<u8> {
        crypto::hmac_sha256(secret, self.0.as_bytes()).to_vec()
    }

    /// Cookie value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

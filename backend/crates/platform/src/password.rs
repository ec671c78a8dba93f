//! Password Hashing and Verification
//!
//! Argon2id hashing with a configurable work factor:
//! - Random 16-byte salt per hash, PHC string output
//! - Constant-time verification (delegated to the Argon2 primitive)
//! - Zeroization of the clear text on drop
//! - NFKC normalization so visually identical input hashes identically
//!
//! Neither [`ClearTextPassword`] nor [`HashedPassword`] print their
//! contents through `Debug`.

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound on accepted input, in code points.
pub const MAX_PASSWORD_LENGTH: usize = 1024;

// ============================================================================
// Error Types
// ============================================================================

/// Input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// NFKC-normalize and check presence.
    ///
    /// Only emptiness (after trimming) and an upper length bound are
    /// enforced; strength rules are left to the client.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(normalized))
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

/// Argon2id hash in PHC string format
/// (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`).
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a stored PHC string.
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    /// PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
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
// Hasher
// ============================================================================

/// Argon2id work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashParams {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl HashParams {
    /// `true` when at least as strong as the OWASP Argon2id baseline in both
    /// memory and iterations.
    pub fn meets_baseline(&self) -> bool {
        let baseline = Self::default();
        self.memory_kib >= baseline.memory_kib && self.iterations >= baseline.iterations
    }
}

impl Default for HashParams {
    /// OWASP baseline: m=19 MiB, t=2, p=1.
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

/// Argon2id hasher bound to a fixed work factor.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(params: HashParams) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            params.memory_kib,
            params.iterations,
            params.parallelism,
            None,
        )
        .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    /// Constant-time check of `password` against `hashed`.
    ///
    /// Parameters are read from the PHC string, so hashes produced under an
    /// older work factor still verify. A malformed hash verifies as `false`.
    pub fn verify(&self, password: &ClearTextPassword, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return false;
        };

        self.argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }

    /// Burn the same CPU as a real verification and return `false`.
    ///
    /// Used when the account does not exist so response timing does not
    /// reveal which emails are registered.
    pub fn verify_dummy(&self, password: &ClearTextPassword) -> bool {
        let _ = self.hash(password);
        false
    }

    /// `true` when `hashed` was produced with a different algorithm or a
    /// weaker work factor than this hasher's.
    pub fn needs_rehash(&self, hashed: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&hashed.hash) else {
            return true;
        };
        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }
        match Params::try_from(&parsed) {
            Ok(p) => {
                p.m_cost() < self.params.m_cost()
                    || p.t_cost() < self.params.t_cost()
                    || p.p_cost() < self.params.p_cost()
            }
            Err(_) => true,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::new(HashParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_baseline_params() {
        assert!(HashParams::default().meets_baseline());
        assert!(
            HashParams {
                memory_kib: 65536,
                iterations: 3,
                parallelism: 4,
            }
            .meets_baseline()
        );
        assert!(
            !HashParams {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            }
            .meets_baseline()
        );
        assert!(
            !HashParams {
                iterations: 1,
                ..HashParams::default()
            }
            .meets_baseline()
        );
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        assert!(ClearTextPassword::new("secret1".to_string()).is_ok());
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(
            ClearTextPassword::new("".to_string()).unwrap_err(),
            PasswordPolicyError::Empty
        );
        assert_eq!(
            ClearTextPassword::new("   \t".to_string()).unwrap_err(),
            PasswordPolicyError::Empty
        );
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let hashed = hasher.hash(&pw("secret1")).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&pw("secret1"), &hashed));
        assert!(!hasher.verify(&pw("secret2"), &hashed));
    }

    #[test]
    fn test_salt_is_random() {
        let hasher = cheap_hasher();
        let a = hasher.hash(&pw("secret1")).unwrap();
        let b = hasher.hash(&pw("secret1")).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = cheap_hasher();
        // U+FF41 FULLWIDTH LATIN SMALL LETTER A normalizes to 'a'
        let hashed = hasher.hash(&pw("\u{FF41}bc")).unwrap();
        assert!(hasher.verify(&pw("abc"), &hashed));
    }

    #[test]
    fn test_phc_string_reload() {
        let hasher = cheap_hasher();
        let hashed = hasher.hash(&pw("secret1")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&pw("secret1"), &restored));
        assert!(HashedPassword::from_phc_string("not_a_valid_hash").is_err());
    }

    #[test]
    fn test_verify_uses_stored_params() {
        let weak = cheap_hasher();
        let hashed = weak.hash(&pw("secret1")).unwrap();

        let strong = PasswordHasher::new(HashParams {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        assert!(strong.verify(&pw("secret1"), &hashed));
        assert!(strong.needs_rehash(&hashed));
        assert!(!weak.needs_rehash(&hashed));
    }

    #[test]
    fn test_dummy_verify_is_false() {
        assert!(!cheap_hasher().verify_dummy(&pw("anything")));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = PasswordHasher::new(HashParams {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(matches!(result, Err(PasswordHashError::InvalidParams(_))));
    }

    #[test]
    fn test_debug_redaction() {
        let password = pw("secret1");
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret1"));

        let hashed = cheap_hasher().hash(&password).unwrap();
        assert!(!format!("{:?}", hashed).contains("argon2id"));
    }
}

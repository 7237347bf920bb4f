// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::error::AppError;
use scrypt::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier,
        SaltString,
    },
    Params, Scrypt,
};

/// Work factor (log2 of the scrypt CPU/memory cost) for new hashes.
///
/// Raising this is a versioned decision: every stored hash carries its own
/// parameters, so hashes made under an older value still verify.
pub const DEFAULT_COST_LOG_N: u8 = 15;

/// Lowest accepted work factor
pub const MIN_COST_LOG_N: u8 = 4;

/// Highest accepted work factor
pub const MAX_COST_LOG_N: u8 = 20;

const BLOCK_SIZE: u32 = 8;
const PARALLELISM: u32 = 1;

/// Salted adaptive password hasher producing PHC strings
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Hasher using [`DEFAULT_COST_LOG_N`]
    pub fn new() -> Self {
        // The default constant is inside the accepted range
        Self::with_cost(DEFAULT_COST_LOG_N).unwrap_or_else(|_| Self {
            params: Params::default(),
        })
    }

    /// Hasher with an explicit work factor
    pub fn with_cost(log_n: u8) -> Result<Self, AppError> {
        if !(MIN_COST_LOG_N..=MAX_COST_LOG_N).contains(&log_n) {
            return Err(AppError::InvalidInput(format!(
                "password cost must be between {MIN_COST_LOG_N} and {MAX_COST_LOG_N}"
            )));
        }
        let params = Params::new(log_n, BLOCK_SIZE, PARALLELISM, Params::RECOMMENDED_LEN)
            .map_err(|e| AppError::Internal(format!("scrypt params: {e}")))?;
        Ok(Self { params })
    }

    /// Work factor applied to new hashes
    pub fn cost(&self) -> u8 {
        self.params.log_n()
    }

    /// Hash a password with a fresh random salt
    pub fn encode(&self, plain: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Scrypt
            .hash_password_customized(plain.as_bytes(), None, None, self.params, &salt)?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// The comparison is constant time. A mismatch is `Ok(false)`; only a
    /// structurally invalid hash is an error.
    pub fn matches(&self, plain: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)?;
        match Scrypt.verify_password(plain.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u8 = 8;

    #[test]
    fn test_password_hashing_and_verification() {
        let hasher = PasswordHasher::with_cost(TEST_COST).unwrap();
        let hash = hasher.encode("secret123").unwrap();

        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$scrypt$"));
        assert!(hasher.matches("secret123", &hash).unwrap());
        assert!(!hasher.matches("wrong", &hash).unwrap());
    }

    #[test]
    fn test_same_input_gives_different_hashes() {
        let hasher = PasswordHasher::with_cost(TEST_COST).unwrap();
        let a = hasher.encode("secret123").unwrap();
        let b = hasher.encode("secret123").unwrap();

        assert_ne!(a, b);
        assert!(hasher.matches("secret123", &a).unwrap());
        assert!(hasher.matches("secret123", &b).unwrap());
    }

    #[test]
    fn test_old_cost_hashes_still_verify() {
        let old = PasswordHasher::with_cost(TEST_COST).unwrap();
        let hash = old.encode("secret123").unwrap();

        let raised = PasswordHasher::with_cost(TEST_COST + 2).unwrap();
        assert_eq!(raised.cost(), TEST_COST + 2);
        assert!(raised.matches("secret123", &hash).unwrap());
        assert!(!raised.matches("secret124", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let hasher = PasswordHasher::with_cost(TEST_COST).unwrap();
        let err = hasher.matches("secret123", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AppError::PasswordHash(_)));
    }

    #[test]
    fn test_cost_bounds() {
        assert!(PasswordHasher::with_cost(MIN_COST_LOG_N - 1).is_err());
        assert!(PasswordHasher::with_cost(MAX_COST_LOG_N + 1).is_err());
        assert_eq!(PasswordHasher::new().cost(), DEFAULT_COST_LOG_N);
    }
}

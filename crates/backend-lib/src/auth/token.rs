// ============================
// crates/backend-lib/src/auth/token.rs
// ============================
//! Signed, time-limited bearer tokens.
//!
//! Tokens are HS256 JWTs whose subject is the username. The signing key is
//! generated when the issuer is built and lives only in memory, so tokens
//! issued by a previous process never verify.
use crate::error::AppError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default token lifetime: 1 hour
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Signing key size in bytes (256 bits)
const SIGNING_KEY_BYTES: usize = 32;

/// Claims carried by every token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Username
    pub sub: String,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
    /// Unique per token so two logins within one second still differ
    pub jti: String,
}

/// Issues and verifies bearer tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    /// Issuer with a fresh random key and [`DEFAULT_TOKEN_TTL`]
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOKEN_TTL)
    }

    /// Issuer with a fresh random key and a custom lifetime
    pub fn with_ttl(ttl: Duration) -> Self {
        let mut secret = [0u8; SIGNING_KEY_BYTES];
        rand::rng().fill_bytes(&mut secret);
        Self {
            encoding: EncodingKey::from_secret(&secret),
            decoding: DecodingKey::from_secret(&secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `username`, valid from now until now + ttl
    pub fn issue(&self, username: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = TokenClaims {
            sub: username.to_string(),
            iat: now,
            exp: now.saturating_add(ttl),
            jti: uuid::Uuid::new_v4().to_string(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify the signature and return the claims without checking expiry
    fn verified_claims(&self, token: &str) -> Result<TokenClaims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by the callers against our own clock rule
        validation.validate_exp = false;
        validation.leeway = 0;
        let data = decode::<TokenClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }

    /// Subject of a correctly signed token. Expiry is not checked.
    pub fn extract_username(&self, token: &str) -> Result<String, AppError> {
        Ok(self.verified_claims(token)?.sub)
    }

    /// True iff the signature verifies and the token has not expired
    pub fn is_valid(&self, token: &str) -> bool {
        self.verified_claims(token)
            .map(|claims| Utc::now().timestamp() < claims.exp)
            .unwrap_or(false)
    }

    /// Subject of a correctly signed, unexpired token
    pub fn validate_and_extract_username(&self, token: &str) -> Result<String, AppError> {
        if token.trim().is_empty() {
            return Err(AppError::InvalidToken);
        }
        let claims = self
            .verified_claims(token)
            .map_err(|_| AppError::InvalidToken)?;
        if Utc::now().timestamp() >= claims.exp {
            return Err(AppError::InvalidToken);
        }
        Ok(claims.sub)
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

//! Shared JWT validation for the marketplace services
//!
//! RS256 only; no symmetric fallback. Keys are loaded once at startup from
//! PEM strings and are immutable afterwards. Services that only validate
//! tokens call `initialize_validation_only` with the public key.

use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

/// JWT algorithm - MUST be RS256 for all marketplace services
const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// JWT claims: standard claims plus the group grants used for curation
/// permission checks (e.g. "feed:curate", "websites:curate").
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Group grants held by the caller
    #[serde(default)]
    pub groups: Vec<String>,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Initialize both keys. Only the token-issuing collaborator needs this;
/// the services in this workspace normally use `initialize_validation_only`.
pub fn initialize_keys(private_key_pem: &str, public_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA private key: {e}"))?;
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;
    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Initialize for validation-only services (public key only).
pub fn initialize_validation_only(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

fn get_encoding_key() -> Result<&'static EncodingKey> {
    JWT_ENCODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT keys not initialized. Call initialize_keys() during startup."))
}

fn get_decoding_key() -> Result<&'static DecodingKey> {
    JWT_DECODING_KEY.get().ok_or_else(|| {
        anyhow!(
            "JWT keys not initialized. Call initialize_keys() or \
             initialize_validation_only() during startup."
        )
    })
}

/// Generate an access token carrying the given group grants.
///
/// Used by test fixtures and local tooling; production tokens come from the
/// identity collaborator.
pub fn generate_access_token(user_id: Uuid, groups: &[&str]) -> Result<String> {
    let now = Utc::now();
    let expiry = now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS);

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: expiry.timestamp(),
        groups: groups.iter().map(|g| g.to_string()).collect(),
    };

    let encoding_key = get_encoding_key()?;
    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to generate access token: {e}"))
}

/// Validate and decode a JWT token.
///
/// Verifies the RS256 signature against the initialized public key and
/// checks expiration. No fallback to weaker algorithms.
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = get_decoding_key()?;

    let mut validation = Validation::new(JWT_ALGORITHM);
    validation.validate_exp = true;

    decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Token validation failed: {e}"))
}

//! # Identity Verification
//!
//! Resolves bearer credentials to user identities. Synapse consumes tokens
//! issued by the external identity provider; this module only verifies them.
//! `create_access_token` exists for tests and local development.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use error::{AppError, Result};
use jsonwebtoken::{errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Token verification configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Base64-encoded shared secret
    pub secret:             String,
    /// Access token lifetime in seconds
    pub expiration_seconds: u64,
    /// Expected token issuer
    pub issuer:             String,
    /// Expected token audience
    pub audience:           String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret:             std::env::var("SYNAPSE_JWT_SECRET").unwrap_or_default(),
            expiration_seconds: std::env::var("SYNAPSE_JWT_EXPIRATION_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3600),
            issuer:             std::env::var("SYNAPSE_JWT_ISSUER").unwrap_or_else(|_| "synapse".to_string()),
            audience:           std::env::var("SYNAPSE_JWT_AUDIENCE").unwrap_or_else(|_| "synapse-users".to_string()),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email
    pub email: String,

    /// User display name
    pub name: String,

    /// Token issuer
    pub iss: String,

    /// Token audience
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: u64,

    /// Issued at (Unix timestamp)
    pub iat: u64,

    /// Unique token ID
    pub jti: String,
}

/// Creates a new access token
///
/// # Errors
///
/// Returns an error if the secret is invalid or token encoding fails.
pub fn create_access_token(config: &JwtConfig, user_id: &str, email: &str, name: &str) -> Result<String> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| AppError::internal(format!("Failed to get current time: {}", e)))?;

    let issued_at = now.as_secs();
    let expiration = now + Duration::from_secs(config.expiration_seconds);

    let claims = Claims {
        sub:   user_id.to_string(),
        email: email.to_string(),
        name:  name.to_string(),
        iss:   config.issuer.clone(),
        aud:   config.audience.clone(),
        exp:   expiration.as_secs(),
        iat:   issued_at,
        jti:   uuid::Uuid::new_v4().to_string(),
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_base64_secret(&config.secret)
            .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?,
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {}", e)))?;

    Ok(token)
}

/// Validates a token and returns the claims
///
/// # Errors
///
/// Returns [`AppError::TokenExpired`] for expired tokens and
/// [`AppError::TokenInvalid`] for any other verification failure.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims> {
    let decoding_key = DecodingKey::from_base64_secret(&config.secret)
        .map_err(|e| AppError::config(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::default();
    let mut iss_set = HashSet::new();
    iss_set.insert(config.issuer.clone());
    validation.iss = Some(iss_set);
    let mut aud = HashSet::new();
    aud.insert(config.audience.clone());
    validation.aud = Some(aud);
    validation.validate_exp = true;

    let claims = jsonwebtoken::decode(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::TokenInvalid,
        }
    })?;

    Ok(claims.claims)
}

/// Extracts the Bearer token from the Authorization header
///
/// # Returns
///
/// The token string if present, or None if missing/invalid.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if !auth_header.starts_with("Bearer ") {
        return None;
    }

    let token = auth_header.trim_start_matches("Bearer ").trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}

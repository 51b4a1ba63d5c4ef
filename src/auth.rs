// ABOUTME: Session token issuance and validation for portal users
// ABOUTME: Handles signed cookie-session tokens, expiry, and caller identity
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! # Authentication and Session Management
//!
//! This module issues and validates the signed session tokens carried by
//! the browser cookie. Identity comes from an external login provider; a
//! successful callback upserts the user row and mints a token here.

use crate::models::UserRole;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Session validation error with detailed information
#[derive(Debug, Clone)]
pub enum SessionValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not a proper signed token)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for SessionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired { expired_at } => {
                write!(
                    f,
                    "Session expired at {}",
                    expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            }
            Self::TokenInvalid { reason } => {
                write!(f, "Session token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "Session token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for SessionValidationError {}

/// Claims carried by a session token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    /// Role at issuance; authorization decisions re-check the database
    pub role: UserRole,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
}

/// Authenticated caller identity extracted from a session token
#[derive(Debug, Clone, Copy)]
pub struct AuthResult {
    /// Authenticated user id
    pub user_id: i64,
    /// Role claimed at issuance
    pub role: UserRole,
}

/// Authentication manager for session tokens
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new manager from a signing secret
    #[must_use]
    pub fn new(secret: &[u8], session_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_expiry_hours,
        }
    }

    /// Issue a session token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if token encoding fails
    pub fn generate_token(&self, user_id: i64, role: UserRole) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.session_expiry_hours);

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Validate a session token and extract the caller identity
    ///
    /// # Errors
    ///
    /// Returns a `SessionValidationError` describing expiry, bad
    /// signature, or malformation
    pub fn validate_token(&self, token: &str) -> Result<AuthResult, SessionValidationError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    // Recover the expiry for the error message when possible
                    let expired_at = decode_expiry(token).unwrap_or_else(Utc::now);
                    SessionValidationError::TokenExpired { expired_at }
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    SessionValidationError::TokenInvalid {
                        reason: "signature mismatch".into(),
                    }
                }
                _ => SessionValidationError::TokenMalformed {
                    details: e.to_string(),
                },
            }
        })?;

        let user_id = data
            .claims
            .sub
            .parse::<i64>()
            .map_err(|_| SessionValidationError::TokenMalformed {
                details: "subject is not a user id".into(),
            })?;

        Ok(AuthResult {
            user_id,
            role: data.claims.role,
        })
    }

    /// Session lifetime in seconds, for cookie `Max-Age`
    #[must_use]
    pub const fn session_max_age_secs(&self) -> i64 {
        self.session_expiry_hours * 3600
    }
}

/// Decode the expiry claim without verifying the signature, for error
/// reporting only
fn decode_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp, 0)
}

/// Generate a secure session signing secret (64 bytes)
#[must_use]
pub fn generate_session_secret() -> [u8; 64] {
    use rand::Rng;
    let mut secret = [0u8; 64];
    rand::thread_rng().fill(&mut secret[..]);
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> AuthManager {
        AuthManager::new(&generate_session_secret(), 24)
    }

    #[test]
    fn test_token_round_trip() {
        let manager = test_manager();
        let token = manager.generate_token(7, UserRole::Client).unwrap();

        let auth = manager.validate_token(&token).unwrap();
        assert_eq!(auth.user_id, 7);
        assert_eq!(auth.role, UserRole::Client);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let manager = test_manager();
        let other = test_manager();

        let token = manager.generate_token(7, UserRole::User).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let manager = test_manager();
        let err = manager.validate_token("not-a-token").unwrap_err();
        assert!(matches!(err, SessionValidationError::TokenMalformed { .. }));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = AuthManager::new(&generate_session_secret(), -1);
        let token = manager.generate_token(7, UserRole::User).unwrap();

        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, SessionValidationError::TokenExpired { .. }));
    }
}

use std::sync::OnceLock;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Holds the signing secret for the life of the process; it is never mutated
/// after construction and can be shared between tasks behind an `Arc`.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    placeholder_hash: OnceLock<Option<String>>,
}

/// Plaintext behind the placeholder hash. Never accepted as a credential.
const PLACEHOLDER_PASSWORD: &str = "placeholder-password-for-unknown-identities";

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Signed session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret),
            placeholder_hash: OnceLock::new(),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and generate a session token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `claims` - Claims to encode in the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match (or the hash is unreadable)
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        claims: &Claims,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.encode(claims)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject an identity that has no stored hash.
    ///
    /// Runs a full password verification against a placeholder hash, so the
    /// rejection costs the same as a wrong password for a known identity.
    /// The placeholder is hashed on first use.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let placeholder = self
            .placeholder_hash
            .get_or_init(|| self.password_hasher.hash(PLACEHOLDER_PASSWORD).ok());

        match placeholder {
            Some(hash) => {
                self.password_hasher.verify(password, hash);
            }
            None => tracing::warn!("Placeholder hash unavailable; unknown identity rejected early"),
        }

        AuthenticationError::InvalidCredentials
    }

    /// Generate a token without password verification.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn generate_token(&self, claims: &Claims) -> Result<String, JwtError> {
        self.jwt_handler.encode(claims)
    }

    /// Validate a token and return its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }

    /// Validate a token as of `current_timestamp`.
    pub fn validate_token_at(&self, token: &str, current_timestamp: i64) -> Result<Claims, JwtError> {
        self.jwt_handler.decode_at(token, current_timestamp)
    }
}

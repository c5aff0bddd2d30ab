use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

/// Error reported by a credential store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Credential record not found")]
    NotFound,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Top-level error for signup, login and token verification.
///
/// `InvalidCredentials` is returned both for an unknown email and for a wrong
/// password so that callers cannot tell the two apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Unexpected signing method: {0}")]
    UnexpectedSigningMethod(String),

    #[error("Malformed claims: {0}")]
    MalformedClaims(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::EncodingFailed(msg) => AuthError::Signing(msg),
            JwtError::UnexpectedSigningMethod(alg) => AuthError::UnexpectedSigningMethod(alg),
            JwtError::InvalidToken(msg) => AuthError::InvalidToken(msg),
            JwtError::TokenExpired => AuthError::TokenExpired,
            JwtError::MalformedClaims(msg) => AuthError::MalformedClaims(msg),
        }
    }
}

impl From<PasswordError> for AuthError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::HashingFailed(msg) => AuthError::Hashing(msg),
        }
    }
}

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::CredentialRecord;
use crate::domain::auth::models::NewCredential;
use crate::domain::auth::models::SessionToken;

/// Port for authentication operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new credential record.
    ///
    /// # Arguments
    /// * `email` - Email address, validated by the caller
    /// * `password` - Plaintext password; only its hash is kept
    ///
    /// # Errors
    /// * `Hashing` - Password hashing failed
    /// * `Persistence` - The store rejected the record (duplicate email, database failure)
    async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError>;

    /// Check credentials and issue a session token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Signing` - Token generation failed
    /// * `Persistence` - Store lookup failed for a reason other than absence
    async fn login(&self, email: &str, password: &str) -> Result<SessionToken, AuthError>;

    /// Validate a session token and return the current stored record it refers to.
    ///
    /// # Errors
    /// * `UnexpectedSigningMethod` - Header declares a non-HMAC algorithm
    /// * `InvalidToken` - Bad signature or undecodable token
    /// * `MalformedClaims` - `exp` or `email` missing or mistyped
    /// * `TokenExpired` - Token is past its expiry
    /// * `Persistence` - Store lookup by the email claim failed
    async fn verify_token(&self, token: &str) -> Result<CredentialRecord, AuthError>;
}

/// Persistence operations for credential records.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new credential record; the store assigns its identifier.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, credential: NewCredential) -> Result<(), StoreError>;

    /// Retrieve a credential record by exact email.
    ///
    /// # Errors
    /// * `NotFound` - No record with this email
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<CredentialRecord, StoreError>;
}

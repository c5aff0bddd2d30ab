use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::CredentialRecord;
use crate::domain::auth::models::NewCredential;
use crate::domain::auth::models::SessionToken;
use crate::domain::auth::models::TOKEN_VALIDITY_HOURS;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::CredentialStore;

/// Authentication engine.
///
/// Stateless apart from the injected store and the read-only authenticator,
/// so one instance serves any number of concurrent requests.
pub struct AuthService<CS>
where
    CS: CredentialStore,
{
    store: Arc<CS>,
    authenticator: Arc<Authenticator>,
}

impl<CS> AuthService<CS>
where
    CS: CredentialStore,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `authenticator` - Password hasher and token signer built from the process secret
    pub fn new(store: Arc<CS>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            authenticator,
        }
    }
}

#[async_trait]
impl<CS> AuthServicePort for AuthService<CS>
where
    CS: CredentialStore,
{
    async fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let password_hash = self.authenticator.hash_password(password)?;

        self.store
            .create(NewCredential::new(email, password_hash))
            .await?;

        tracing::info!(email = %email, "Credential record created");
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<SessionToken, AuthError> {
        let record = match self.store.find_by_email(email).await {
            Ok(record) => record,
            Err(StoreError::NotFound) => {
                tracing::debug!(email = %email, "Login rejected: no credential record");
                self.authenticator.reject_unknown(password);
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        let claims = Claims::for_user(record.id, record.email.as_str(), TOKEN_VALIDITY_HOURS);

        let result = self
            .authenticator
            .authenticate(password, &record.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %record.id, "Login rejected: password mismatch");
                    AuthError::InvalidCredentials
                }
                AuthenticationError::JwtError(err) => AuthError::from(err),
            })?;

        tracing::info!(user_id = %record.id, "Session token issued");
        Ok(SessionToken::new(result.access_token))
    }

    async fn verify_token(&self, token: &str) -> Result<CredentialRecord, AuthError> {
        let claims = self.authenticator.validate_token(token)?;

        let record = self.store.find_by_email(&claims.email).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use auth::JwtHandler;
    use mockall::mock;

    use super::*;
    use crate::domain::auth::models::UserId;

    const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

    mock! {
        pub TestCredentialStore {}

        #[async_trait]
        impl CredentialStore for TestCredentialStore {
            async fn create(&self, credential: NewCredential) -> Result<(), StoreError>;
            async fn find_by_email(&self, email: &str) -> Result<CredentialRecord, StoreError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(SECRET))
    }

    fn stored_record(email: &str, password: &str) -> CredentialRecord {
        let password_hash = Authenticator::new(SECRET).hash_password(password).unwrap();
        CredentialRecord {
            id: UserId(1),
            email: email.to_string(),
            password_hash,
        }
    }

    #[tokio::test]
    async fn test_signup_stores_hashed_password() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_create()
            .withf(|credential| {
                credential.email == "a@x.com"
                    && credential.password_hash.starts_with("$argon2")
                    && !credential.password_hash.contains("secret1")
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(store), authenticator());

        let result = service.signup("a@x.com", "secret1").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_create()
            .times(1)
            .returning(|credential| Err(StoreError::EmailAlreadyExists(credential.email)));

        let service = AuthService::new(Arc::new(store), authenticator());

        let result = service.signup("a@x.com", "secret1").await;
        assert_eq!(
            result,
            Err(AuthError::Persistence(StoreError::EmailAlreadyExists(
                "a@x.com".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_signup_database_failure_is_not_retried() {
        let mut store = MockTestCredentialStore::new();

        store
            .expect_create()
            .times(1)
            .returning(|_| Err(StoreError::DatabaseError("connection refused".to_string())));

        let service = AuthService::new(Arc::new(store), authenticator());

        let result = service.signup("a@x.com", "secret1").await;
        assert!(matches!(
            result,
            Err(AuthError::Persistence(StoreError::DatabaseError(_)))
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut store = MockTestCredentialStore::new();
        let record = stored_record("a@x.com", "secret1");

        store
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(move |_| Ok(record.clone()));

        let service = AuthService::new(Arc::new(store), authenticator());

        let token = service.login("a@x.com", "secret1").await.unwrap();

        let claims = JwtHandler::new(SECRET).decode(token.as_str()).unwrap();
        assert_eq!(claims.sub, Some("1".to_string()));
        assert_eq!(claims.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_login_token_valid_for_one_hour() {
        let mut store = MockTestCredentialStore::new();
        let record = stored_record("a@x.com", "secret1");

        store
            .expect_find_by_email()
            .returning(move |_| Ok(record.clone()));

        let service = AuthService::new(Arc::new(store), authenticator());

        let before = chrono::Utc::now().timestamp();
        let token = service.login("a@x.com", "secret1").await.unwrap();
        let after = chrono::Utc::now().timestamp();

        let claims = JwtHandler::new(SECRET).decode(token.as_str()).unwrap();
        assert!(claims.exp >= before + 3600);
        assert!(claims.exp <= after + 3600);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
        let mut unknown_store = MockTestCredentialStore::new();
        unknown_store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let mut known_store = MockTestCredentialStore::new();
        let record = stored_record("a@x.com", "secret1");
        known_store
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(record.clone()));

        let unknown = AuthService::new(Arc::new(unknown_store), authenticator())
            .login("b@x.com", "anything")
            .await;
        let wrong_password = AuthService::new(Arc::new(known_store), authenticator())
            .login("a@x.com", "wrong")
            .await;

        assert_eq!(unknown, Err(AuthError::InvalidCredentials));
        assert_eq!(wrong_password, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_costs_a_password_verification() {
        let mut store = MockTestCredentialStore::new();
        let record = stored_record("a@x.com", "secret1");
        store
            .expect_find_by_email()
            .returning(move |email| {
                if email == "a@x.com" {
                    Ok(record.clone())
                } else {
                    Err(StoreError::NotFound)
                }
            });

        let service = AuthService::new(Arc::new(store), authenticator());

        // First unknown-email login also builds the placeholder hash
        service.login("b@x.com", "secret1").await.unwrap_err();

        let started = Instant::now();
        service.login("a@x.com", "wrong").await.unwrap_err();
        let wrong_password = started.elapsed();

        let started = Instant::now();
        service.login("b@x.com", "wrong").await.unwrap_err();
        let unknown_email = started.elapsed();

        assert!(
            unknown_email * 4 >= wrong_password,
            "unknown email took {:?}, wrong password took {:?}",
            unknown_email,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_login_store_failure_propagates() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(StoreError::DatabaseError("timeout".to_string())));

        let service = AuthService::new(Arc::new(store), authenticator());

        let result = service.login("a@x.com", "secret1").await;
        assert!(matches!(
            result,
            Err(AuthError::Persistence(StoreError::DatabaseError(_)))
        ));
    }

    #[tokio::test]
    async fn test_verify_token_refetches_record() {
        let mut store = MockTestCredentialStore::new();
        let record = stored_record("a@x.com", "secret1");
        let expected = record.clone();

        store
            .expect_find_by_email()
            .withf(|email| email == "a@x.com")
            .times(2)
            .returning(move |_| Ok(record.clone()));

        let service = AuthService::new(Arc::new(store), authenticator());

        let token = service.login("a@x.com", "secret1").await.unwrap();
        let verified = service.verify_token(token.as_str()).await.unwrap();

        assert_eq!(verified, expected);
    }

    #[tokio::test]
    async fn test_verify_expired_token() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_email().times(0);

        let service = AuthService::new(Arc::new(store), authenticator());

        let issued_at = chrono::Utc::now().timestamp() - 2 * 3600;
        let claims = Claims::for_user_at(1, "a@x.com", TOKEN_VALIDITY_HOURS, issued_at);
        let token = JwtHandler::new(SECRET).encode(&claims).unwrap();

        let result = service.verify_token(&token).await;
        assert_eq!(result, Err(AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn test_verify_token_from_other_secret() {
        let mut store = MockTestCredentialStore::new();
        store.expect_find_by_email().times(0);

        let service = AuthService::new(Arc::new(store), authenticator());

        let claims = Claims::for_user(1, "a@x.com", TOKEN_VALIDITY_HOURS);
        let token = JwtHandler::new(b"another-secret-key-with-at-least-32-bytes")
            .encode(&claims)
            .unwrap();

        let result = service.verify_token(&token).await;
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_verify_token_for_missing_record() {
        let mut store = MockTestCredentialStore::new();
        store
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = AuthService::new(Arc::new(store), authenticator());

        let claims = Claims::for_user(1, "gone@x.com", TOKEN_VALIDITY_HOURS);
        let token = JwtHandler::new(SECRET).encode(&claims).unwrap();

        let result = service.verify_token(&token).await;
        assert_eq!(result, Err(AuthError::Persistence(StoreError::NotFound)));
    }
}

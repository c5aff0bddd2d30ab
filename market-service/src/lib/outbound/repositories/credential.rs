use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::auth::errors::StoreError;
use crate::domain::auth::models::CredentialRecord;
use crate::domain::auth::models::NewCredential;
use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::CredentialStore;

/// PostgreSQL implementation of CredentialStore.
///
/// Email uniqueness is enforced by the `users_email_key` constraint.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password_hash: String,
}

impl From<CredentialRow> for CredentialRecord {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: UserId(row.id),
            email: row.email,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create(&self, credential: NewCredential) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            "#,
        )
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return StoreError::EmailAlreadyExists(credential.email.clone());
                }
            }
            StoreError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<CredentialRecord, StoreError> {
        sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, email, password_hash
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::DatabaseError(e.to_string()))?
        .map(CredentialRecord::from)
        .ok_or(StoreError::NotFound)
    }
}

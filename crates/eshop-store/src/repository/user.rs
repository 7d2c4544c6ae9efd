//! # User Repository
//!
//! Database operations for the `users` collection.
//!
//! ## Email Normalization
//! Emails are lower-cased on the way in (create) and on the way to every
//! lookup, so `Jane@Example.com` and `jane@example.com` are the same key.
//! The UNIQUE index on `email` enforces at most one account per
//! normalized address — the index is the authority, not a pre-check.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::credentials;
use crate::error::{StoreError, StoreResult};
use eshop_core::User;

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Creates a user record.
    ///
    /// Generates a fresh id, normalizes the email, hashes the password,
    /// and inserts atomically (single-record write).
    ///
    /// ## Errors
    /// [`StoreError::DuplicateKey`] when the normalized email already has
    /// a record (unique-index violation).
    pub async fn create(&self, name: &str, email: &str, password: &str) -> StoreResult<User> {
        let normalized = email.to_lowercase();
        let password_hash = credentials::hash_password(password)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: normalized,
            password_hash,
            created_at: Utc::now(),
        };

        debug!(id = %user.id, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // Enrich the duplicate-key error with the offending value;
            // SQLite's message only carries the column name.
            match StoreError::from(e) {
                StoreError::DuplicateKey { field, .. } => StoreError::DuplicateKey {
                    field,
                    value: user.email.clone(),
                },
                other => other,
            }
        })?;

        Ok(user)
    }

    /// Looks a user up by (case-insensitive) email.
    /// Absent is a normal outcome: `Ok(None)`.
    pub async fn get_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let normalized = email.to_lowercase();

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(&normalized)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Point lookup by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Verifies credentials and returns the user on success.
    ///
    /// Returns `Ok(None)` for BOTH an unknown email and a wrong password —
    /// callers can never tell which, so login failures don't confirm
    /// account existence.
    pub async fn verify(&self, email: &str, password: &str) -> StoreResult<Option<User>> {
        let Some(user) = self.get_by_email(email).await? else {
            return Ok(None);
        };

        if credentials::verify_password(password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{RecordStore, StoreConfig};

    async fn test_store() -> RecordStore {
        RecordStore::open(StoreConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_then_lookup_any_case() {
        let store = test_store().await;
        let users = store.users();

        let created = users
            .create("Jane", "Jane@Example.com", "hunter2!")
            .await
            .unwrap();
        assert_eq!(created.email, "jane@example.com");

        // Lookup is case-insensitive and returns the same record
        let found = users.get_by_email("JANE@EXAMPLE.COM").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_by_index() {
        let store = test_store().await;
        let users = store.users();

        users.create("Jane", "jane@example.com", "pw-one").await.unwrap();

        // Different case, different password: same normalized key
        let err = users
            .create("Janet", "JANE@example.com", "pw-two")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey { .. }));

        // Only one record exists afterwards
        let found = users.get_by_email("jane@example.com").await.unwrap().unwrap();
        assert_eq!(found.name, "Jane");
    }

    #[tokio::test]
    async fn test_verify_matches_and_rejects() {
        let store = test_store().await;
        let users = store.users();

        let created = users
            .create("Jane", "jane@example.com", "hunter2!")
            .await
            .unwrap();

        let verified = users.verify("jane@example.com", "hunter2!").await.unwrap();
        assert_eq!(verified.unwrap().id, created.id);

        // Wrong password and unknown email are the same outcome
        assert!(users
            .verify("jane@example.com", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(users
            .verify("nobody@example.com", "hunter2!")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_verify_is_case_insensitive_on_email() {
        let store = test_store().await;
        let users = store.users();

        let created = users
            .create("Jane", "jane@example.com", "hunter2!")
            .await
            .unwrap();

        let verified = users.verify("Jane@Example.COM", "hunter2!").await.unwrap();
        assert_eq!(verified.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_get_absent_user_is_none_not_error() {
        let store = test_store().await;

        assert!(store
            .users()
            .get_by_email("ghost@example.com")
            .await
            .unwrap()
            .is_none());
        assert!(store.users().get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_plaintext_never_stored() {
        let store = test_store().await;

        let created = store
            .users()
            .create("Jane", "jane@example.com", "hunter2!")
            .await
            .unwrap();

        assert!(!created.password_hash.contains("hunter2"));
        assert!(created.password_hash.starts_with("$argon2"));
    }
}

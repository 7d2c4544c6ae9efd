//! # Session Manager
//!
//! The authentication state machine.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Restoring ──restore()──┬──▶ Authenticated(session)                    │
//! │   (startup)              │         │    ▲                               │
//! │                          │    logout()  │ login() / register()          │
//! │                          │         ▼    │                               │
//! │                          └──▶ Unauthenticated                           │
//! │                                                                         │
//! │   restore() succeeds only when the persisted pointer still resolves     │
//! │   to a live user record; any other outcome lands in Unauthenticated.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Sanitized Sessions
//! A [`Session`] carries id, name, and email. The password hash never
//! leaves the store layer; neither the session nor the on-disk pointer
//! ever holds it.

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ClientError, ClientResult};
use crate::pointer::{PointerStore, SessionPointer};
use eshop_core::User;
use eshop_store::{RecordStore, StoreError};

/// The sanitized projection of the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for Session {
    fn from(user: &User) -> Self {
        Session {
            user_id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// Where the session state machine currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Startup: the persisted pointer has not been resolved yet.
    Restoring,
    /// Nobody is signed in.
    Unauthenticated,
    /// A user is signed in.
    Authenticated(Session),
}

/// Owns the session state and the pointer that persists it across runs.
pub struct SessionManager {
    store: RecordStore,
    pointer: PointerStore,
    state: SessionState,
}

impl SessionManager {
    /// Creates a manager in the `Restoring` state. Call [`restore`] before
    /// reading the state.
    ///
    /// [`restore`]: SessionManager::restore
    pub fn new(store: RecordStore, pointer: PointerStore) -> Self {
        SessionManager {
            store,
            pointer,
            state: SessionState::Restoring,
        }
    }

    /// Resolves the persisted pointer against the record store.
    ///
    /// No pointer, a corrupt pointer, or a pointer whose user record no
    /// longer exists all land in `Unauthenticated`; the stale pointer is
    /// discarded so it cannot mislead the next startup. Only an engine
    /// failure is an error, and even then the state is left safe.
    pub async fn restore(&mut self) -> ClientResult<&SessionState> {
        let Some(pointer) = self.pointer.load() else {
            self.state = SessionState::Unauthenticated;
            return Ok(&self.state);
        };

        match self.store.users().get_by_email(&pointer.email).await {
            Ok(Some(user)) => {
                let session = Session::from(&user);
                info!(user_id = %session.user_id, "Session restored");
                self.state = SessionState::Authenticated(session);
            }
            Ok(None) => {
                warn!(email = %pointer.email, "Session pointer is stale, discarding");
                self.pointer.clear();
                self.state = SessionState::Unauthenticated;
            }
            Err(e) => {
                // Engine failure, not staleness: keep the pointer so a
                // later startup can retry, but don't claim a session.
                self.state = SessionState::Unauthenticated;
                return Err(e.into());
            }
        }

        Ok(&self.state)
    }

    /// Authenticates with email and password.
    ///
    /// On success the state becomes `Authenticated` and the pointer is
    /// persisted. On failure the state is left untouched and the error
    /// never says whether the email exists.
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<Session> {
        let Some(user) = self.store.users().verify(email, password).await? else {
            return Err(ClientError::InvalidCredentials);
        };

        Ok(self.establish(&user))
    }

    /// Creates an account and signs it in.
    ///
    /// Returns [`ClientError::AlreadyExists`] when the email already has an
    /// account. The unique index is the authority; the pre-check only
    /// exists to answer cheaply without a hashing round.
    pub async fn register(&mut self, name: &str, email: &str, password: &str) -> ClientResult<Session> {
        if self.store.users().get_by_email(email).await?.is_some() {
            return Err(ClientError::AlreadyExists);
        }

        let user = self
            .store
            .users()
            .create(name, email, password)
            .await
            .map_err(|e| match e {
                // Lost the race between pre-check and insert
                StoreError::DuplicateKey { .. } => ClientError::AlreadyExists,
                other => ClientError::Store(other),
            })?;

        Ok(self.establish(&user))
    }

    /// Signs out. Always succeeds: the state drops to `Unauthenticated`
    /// even if the pointer file cannot be removed.
    pub fn logout(&mut self) {
        if let SessionState::Authenticated(session) = &self.state {
            info!(user_id = %session.user_id, "Signed out");
        }
        self.state = SessionState::Unauthenticated;
        self.pointer.clear();
    }

    fn establish(&mut self, user: &User) -> Session {
        if let Err(e) = self.pointer.save(&SessionPointer::from(user)) {
            // The session is still valid for this run; only restart
            // recovery is degraded.
            warn!(error = %e, "Failed to persist session pointer");
        }

        let session = Session::from(user);
        info!(user_id = %session.user_id, "Signed in");
        self.state = SessionState::Authenticated(session.clone());
        session
    }

    /// The current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The signed-in session, if any.
    pub fn current(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    /// Whether a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eshop_store::{RecordStore, StoreConfig};
    use uuid::Uuid;

    async fn test_store() -> RecordStore {
        RecordStore::open(StoreConfig::in_memory()).await.unwrap()
    }

    fn temp_pointer() -> PointerStore {
        let path = std::env::temp_dir().join(format!("eshop-session-{}.json", Uuid::new_v4()));
        PointerStore::new(path)
    }

    async fn manager() -> SessionManager {
        SessionManager::new(test_store().await, temp_pointer())
    }

    #[tokio::test]
    async fn test_restore_without_pointer_is_unauthenticated() {
        let mut mgr = manager().await;
        assert_eq!(*mgr.state(), SessionState::Restoring);

        mgr.restore().await.unwrap();
        assert_eq!(*mgr.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_register_authenticates_and_persists_pointer() {
        let mut mgr = manager().await;
        mgr.restore().await.unwrap();

        let session = mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();
        assert_eq!(session.email, "jane@example.com");
        assert!(mgr.is_authenticated());
        assert!(mgr.pointer.exists());

        mgr.pointer.clear();
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected() {
        let mut mgr = manager().await;

        mgr.register("Jane", "jane@example.com", "pw-one").await.unwrap();
        mgr.logout();

        let err = mgr
            .register("Janet", "JANE@example.com", "pw-two")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::AlreadyExists));
        assert!(!mgr.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials_without_detail() {
        let mut mgr = manager().await;
        mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();
        mgr.logout();

        let wrong_password = mgr.login("jane@example.com", "nope").await.unwrap_err();
        let unknown_email = mgr.login("ghost@example.com", "hunter2!").await.unwrap_err();

        // Same error either way
        assert!(matches!(wrong_password, ClientError::InvalidCredentials));
        assert!(matches!(unknown_email, ClientError::InvalidCredentials));
        assert!(!mgr.is_authenticated());
    }

    #[tokio::test]
    async fn test_restore_resolves_live_pointer() {
        let store = test_store().await;
        let pointer = temp_pointer();

        let mut mgr = SessionManager::new(store.clone(), pointer.clone());
        mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();

        // Simulate a restart: fresh manager over the same store and pointer
        let mut restarted = SessionManager::new(store, pointer.clone());
        restarted.restore().await.unwrap();

        let session = restarted.current().unwrap();
        assert_eq!(session.email, "jane@example.com");

        pointer.clear();
    }

    #[tokio::test]
    async fn test_restore_discards_stale_pointer() {
        let mut mgr = manager().await;

        // A pointer referencing a user the store has never seen
        mgr.pointer
            .save(&SessionPointer {
                id: "gone".to_string(),
                name: "Ghost".to_string(),
                email: "ghost@example.com".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();

        mgr.restore().await.unwrap();

        assert_eq!(*mgr.state(), SessionState::Unauthenticated);
        assert!(!mgr.pointer.exists());
    }

    #[tokio::test]
    async fn test_restore_keeps_pointer_on_store_failure() {
        let store = test_store().await;
        let pointer = temp_pointer();

        let mut mgr = SessionManager::new(store.clone(), pointer.clone());
        mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();

        // Restart with the storage engine gone: not staleness, so the
        // pointer must survive for a later retry
        store.close().await;
        let mut restarted = SessionManager::new(store, pointer.clone());
        let err = restarted.restore().await.unwrap_err();

        assert!(matches!(err, ClientError::Store(_)));
        assert_eq!(*restarted.state(), SessionState::Unauthenticated);
        assert!(pointer.exists());

        pointer.clear();
    }

    #[tokio::test]
    async fn test_logout_clears_pointer_and_state() {
        let mut mgr = manager().await;
        mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();

        mgr.logout();

        assert_eq!(*mgr.state(), SessionState::Unauthenticated);
        assert!(!mgr.pointer.exists());

        // Idempotent
        mgr.logout();
        assert_eq!(*mgr.state(), SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_session_never_carries_password_material() {
        let mut mgr = manager().await;
        let session = mgr.register("Jane", "jane@example.com", "hunter2!").await.unwrap();

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("passwordHash"));

        mgr.pointer.clear();
    }
}

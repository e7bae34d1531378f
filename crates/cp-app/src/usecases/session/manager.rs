//! Session manager.
//!
//! Owns the authentication state and its persisted copy under the session
//! key. Writes go to the store first; the in-memory state only changes once
//! the store has accepted the write.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cp_core::ids::UserId;
use cp_core::ports::{KeyValueStorePort, ONBOARDING_PROGRESS_KEY, SESSION_AUTH_KEY};
use cp_core::session::{SessionAction, SessionState};
use cp_core::user::User;
use tracing::{debug, info, info_span, warn, Instrument};

use super::context::SessionContext;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("failed to encode user record: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no authenticated user")]
    NotAuthenticated,
    #[error("user id cannot change from {current} to {attempted}")]
    IdMismatch { current: UserId, attempted: UserId },
    #[error("onboarding cannot be reverted")]
    OnboardingReverted,
    #[error("session changed since revision {expected}")]
    Superseded { expected: u64 },
}

pub struct SessionManager {
    context: Arc<SessionContext>,
    store: Arc<dyn KeyValueStorePort>,
    restored: AtomicBool,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStorePort>) -> Self {
        Self {
            context: SessionContext::default().arc(),
            store,
            restored: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> Arc<SessionContext> {
        self.context.clone()
    }

    pub async fn state(&self) -> SessionState {
        self.context.get_state().await
    }

    pub async fn current_user(&self) -> Option<User> {
        self.context.get_state().await.user().cloned()
    }

    /// Revision of the session state; any login, logout or user update
    /// moves it forward.
    pub fn revision(&self) -> u64 {
        self.context.revision()
    }

    pub async fn revisioned_state(&self) -> (u64, SessionState) {
        self.context.get_revisioned_state().await
    }

    /// Load the persisted session. Runs once per process; later calls return
    /// the current state untouched.
    ///
    /// Never fails: an unreadable or malformed record is treated as absent.
    /// Leftover step progress of an already onboarded user is removed, which
    /// finishes a completion that was interrupted after its commit point.
    pub async fn restore(&self) -> SessionState {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if self.restored.swap(true, Ordering::SeqCst) {
            return self.context.get_state().await;
        }

        let span = info_span!("usecase.session.restore");
        async {
            let user = self.read_persisted_user();

            if let Some(user) = &user {
                if user.is_onboarded {
                    self.roll_forward_completion();
                }
            }

            match user {
                Some(user) => {
                    info!(user_id = %user.id, onboarded = user.is_onboarded, "session restored");
                    self.context.apply(SessionAction::Login(user)).await
                }
                None => {
                    debug!("no persisted session");
                    self.context.apply(SessionAction::SetLoading(false)).await
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Persist `user` under the session key and authenticate with it.
    pub async fn login(&self, user: User) -> Result<SessionState, SessionError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.session.login", user_id = %user.id);
        self.commit_login(user).instrument(span).await
    }

    /// Like [`Self::login`], but only if nothing touched the session since
    /// `expected_revision` was read. Used for responses that were in flight
    /// while the user could still log out or switch accounts.
    pub async fn login_if_unchanged(
        &self,
        user: User,
        expected_revision: u64,
    ) -> Result<SessionState, SessionError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.session.login", user_id = %user.id);
        async {
            if self.context.revision() != expected_revision {
                warn!(expected_revision, "session changed while login was pending");
                return Err(SessionError::Superseded {
                    expected: expected_revision,
                });
            }
            self.commit_login(user).await
        }
        .instrument(span)
        .await
    }

    /// Drop the session record and any onboarding progress, then go anonymous.
    pub async fn logout(&self) -> Result<SessionState, SessionError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.session.logout");
        async {
            self.store
                .delete(SESSION_AUTH_KEY)
                .map_err(SessionError::Storage)?;
            self.store
                .delete(ONBOARDING_PROGRESS_KEY)
                .map_err(SessionError::Storage)?;
            let state = self.context.apply(SessionAction::Logout).await;
            info!("user logged out");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    /// Replace the authenticated user's record without touching
    /// authentication status.
    pub async fn update_user(&self, user: User) -> Result<SessionState, SessionError> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        let span = info_span!("usecase.session.update_user", user_id = %user.id);
        async {
            let current = self.context.get_state().await;
            let existing = current.user().ok_or(SessionError::NotAuthenticated)?;
            if existing.id != user.id {
                return Err(SessionError::IdMismatch {
                    current: existing.id.clone(),
                    attempted: user.id,
                });
            }
            if existing.is_onboarded && !user.is_onboarded {
                return Err(SessionError::OnboardingReverted);
            }

            self.persist_user(&user)?;
            let state = self.context.apply(SessionAction::UpdateUser(user)).await;
            debug!("user record updated");
            Ok(state)
        }
        .instrument(span)
        .await
    }

    async fn commit_login(&self, user: User) -> Result<SessionState, SessionError> {
        self.persist_user(&user)?;
        let state = self.context.apply(SessionAction::Login(user)).await;
        info!("user logged in");
        Ok(state)
    }

    fn persist_user(&self, user: &User) -> Result<(), SessionError> {
        let json = serde_json::to_string(user)?;
        self.store
            .set(SESSION_AUTH_KEY, &json)
            .map_err(SessionError::Storage)
    }

    fn read_persisted_user(&self) -> Option<User> {
        let raw = match self.store.get(SESSION_AUTH_KEY) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(error = %err, "failed to read session record, starting anonymous");
                return None;
            }
        };
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(error = %err, "malformed session record, starting anonymous");
                None
            }
        }
    }

    fn roll_forward_completion(&self) {
        match self.store.get(ONBOARDING_PROGRESS_KEY) {
            Ok(Some(_)) => {
                warn!("onboarded user still has step progress, clearing it");
                if let Err(err) = self.store.delete(ONBOARDING_PROGRESS_KEY) {
                    warn!(error = %err, "failed to clear leftover step progress");
                }
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "failed to read step progress during restore"),
        }
    }
}

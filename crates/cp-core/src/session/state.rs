//! Session state and reducer.
//!
//! The fields are private so that `is_authenticated` can only change together
//! with `user`; every mutation goes through [`SessionState::reduce`].

use serde::Serialize;

use crate::user::User;

/// Whether the one-time startup restore has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Before the first store read completes.
    Loading,
    /// Resting phase for the rest of the process lifetime.
    Ready,
}

/// Actions accepted by the session reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Login(User),
    Logout,
    UpdateUser(User),
    SetLoading(bool),
}

/// Process-wide authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    user: Option<User>,
    is_authenticated: bool,
    phase: SessionPhase,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::initial()
    }
}

impl SessionState {
    /// State at process start: anonymous and loading.
    pub fn initial() -> Self {
        Self {
            user: None,
            is_authenticated: false,
            phase: SessionPhase::Loading,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// `Some(flag)` for an authenticated session, `None` when anonymous.
    pub fn is_onboarded(&self) -> Option<bool> {
        self.user.as_ref().map(|user| user.is_onboarded)
    }

    /// Pure transition function.
    ///
    /// `UpdateUser` on an anonymous session is ignored. `SetLoading(true)` is
    /// only honoured while still loading: once the state has settled it never
    /// goes back to loading.
    pub fn reduce(self, action: SessionAction) -> SessionState {
        match action {
            SessionAction::Login(user) => SessionState {
                user: Some(user),
                is_authenticated: true,
                phase: SessionPhase::Ready,
            },
            SessionAction::Logout => SessionState {
                user: None,
                is_authenticated: false,
                phase: SessionPhase::Ready,
            },
            SessionAction::UpdateUser(user) => {
                if self.is_authenticated {
                    SessionState {
                        user: Some(user),
                        ..self
                    }
                } else {
                    self
                }
            }
            SessionAction::SetLoading(true) => self,
            SessionAction::SetLoading(false) => SessionState {
                phase: SessionPhase::Ready,
                ..self
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;
    use chrono::Utc;

    fn user(onboarded: bool) -> User {
        let mut user = User::new_client(UserId::new("7"), "a@b.com", "A", "B", Utc::now());
        user.is_onboarded = onboarded;
        user
    }

    fn assert_invariant(state: &SessionState) {
        assert_eq!(state.is_authenticated(), state.user().is_some());
    }

    #[test]
    fn initial_state_is_loading_and_anonymous() {
        let state = SessionState::initial();
        assert!(state.is_loading());
        assert!(!state.is_authenticated());
        assert_invariant(&state);
    }

    #[test]
    fn login_authenticates_and_settles() {
        let state = SessionState::initial().reduce(SessionAction::Login(user(false)));
        assert!(state.is_authenticated());
        assert!(!state.is_loading());
        assert_eq!(state.is_onboarded(), Some(false));
        assert_invariant(&state);
    }

    #[test]
    fn logout_clears_user() {
        let state = SessionState::initial()
            .reduce(SessionAction::Login(user(true)))
            .reduce(SessionAction::Logout);
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
        assert_invariant(&state);
    }

    #[test]
    fn update_user_keeps_authentication() {
        let state = SessionState::initial()
            .reduce(SessionAction::Login(user(false)))
            .reduce(SessionAction::UpdateUser(user(true)));
        assert!(state.is_authenticated());
        assert_eq!(state.is_onboarded(), Some(true));
    }

    #[test]
    fn update_user_on_anonymous_session_is_ignored() {
        let state = SessionState::initial()
            .reduce(SessionAction::SetLoading(false))
            .reduce(SessionAction::UpdateUser(user(true)));
        assert!(!state.is_authenticated());
        assert_invariant(&state);
    }

    #[test]
    fn loading_never_returns_once_settled() {
        let state = SessionState::initial()
            .reduce(SessionAction::SetLoading(false))
            .reduce(SessionAction::SetLoading(true));
        assert!(!state.is_loading());
    }

    #[test]
    fn every_action_preserves_invariant() {
        let actions = [
            SessionAction::SetLoading(false),
            SessionAction::UpdateUser(user(false)),
            SessionAction::Login(user(false)),
            SessionAction::UpdateUser(user(true)),
            SessionAction::SetLoading(true),
            SessionAction::Logout,
            SessionAction::Logout,
        ];
        let mut state = SessionState::initial();
        for action in actions {
            state = state.reduce(action);
            assert_invariant(&state);
        }
    }
}

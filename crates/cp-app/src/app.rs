//! # App / 应用
//!
//! Assembles the use cases around one shared [`SessionManager`]. Construction
//! does no I/O; call [`App::start`] once to restore the persisted session.

use std::sync::Arc;

use cp_core::session::SessionState;
use tracing::info;

use crate::deps::AppDeps;
use crate::usecases::{
    AuthFlow, Navigation, NavigationError, Navigator, OnboardingWizard, ProgressTracker,
    SessionManager,
};

pub struct App {
    session: Arc<SessionManager>,
    progress: Arc<ProgressTracker>,
    wizard: Arc<OnboardingWizard>,
    auth: Arc<AuthFlow>,
    navigator: Arc<Navigator>,
}

impl App {
    pub fn new(deps: AppDeps) -> Self {
        let session = Arc::new(SessionManager::new(deps.store.clone()));
        let progress = Arc::new(ProgressTracker::new(deps.store.clone()));
        let wizard = Arc::new(OnboardingWizard::new(
            session.clone(),
            progress.clone(),
            deps.store,
            deps.clock.clone(),
        ));
        let auth = Arc::new(AuthFlow::new(
            session.clone(),
            deps.auth_gateway,
            deps.clock,
        ));
        let navigator = Arc::new(Navigator::new(session.clone(), deps.guard_policy));

        Self {
            session,
            progress,
            wizard,
            auth,
            navigator,
        }
    }

    /// Restore the persisted session. Later calls are no-ops.
    pub async fn start(&self) -> SessionState {
        let state = self.session.restore().await;
        info!(
            authenticated = state.is_authenticated(),
            onboarded = ?state.is_onboarded(),
            "app started"
        );
        state
    }

    /// Navigate to `path`. Leaving the current screen drops any pending
    /// authentication response.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        self.auth.cancel_pending();
        self.navigator.navigate(path).await
    }

    pub fn session(&self) -> Arc<SessionManager> {
        self.session.clone()
    }

    pub fn progress(&self) -> Arc<ProgressTracker> {
        self.progress.clone()
    }

    pub fn wizard(&self) -> Arc<OnboardingWizard> {
        self.wizard.clone()
    }

    pub fn auth(&self) -> Arc<AuthFlow> {
        self.auth.clone()
    }

    pub fn navigator(&self) -> Arc<Navigator> {
        self.navigator.clone()
    }
}

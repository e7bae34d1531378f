//! Navigation over the live session state.
//!
//! Wraps the pure route guard: resolves a path, asks the guard about it and
//! follows redirects to the screen that should actually be rendered.

use std::sync::Arc;

use cp_core::routing::{decide, GuardPolicy, Route, RouteDecision, Screen};
use serde::Serialize;
use tracing::debug;

use crate::usecases::session::SessionManager;

/// Redirects never chain further than login → dashboard → onboarding.
const MAX_REDIRECTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no screen at {0}")]
    NotFound(String),
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub requested: String,
    /// Guard decision for the requested screen.
    pub decision: RouteDecision,
    /// Screen to render after following redirects; `None` while loading.
    pub screen: Option<Screen>,
}

pub struct Navigator {
    session: Arc<SessionManager>,
    policy: GuardPolicy,
}

impl Navigator {
    pub fn new(session: Arc<SessionManager>, policy: GuardPolicy) -> Self {
        Self { session, policy }
    }

    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    pub async fn decide(&self, screen: &Screen) -> RouteDecision {
        let state = self.session.state().await;
        decide(&state, screen, self.policy)
    }

    pub async fn navigate(&self, path: &str) -> Result<Navigation, NavigationError> {
        let requested = match Route::parse(path) {
            Some(Route::Root) => Screen::Dashboard,
            Some(Route::Screen(screen)) => screen,
            None => return Err(NavigationError::NotFound(path.to_string())),
        };

        let state = self.session.state().await;
        let decision = decide(&state, &requested, self.policy);

        let mut screen = requested;
        let mut current = decision;
        for _ in 0..MAX_REDIRECTS {
            match current.redirect_target() {
                Some(target) => {
                    screen = target;
                    current = decide(&state, &screen, self.policy);
                }
                None => break,
            }
        }

        let screen = match current {
            RouteDecision::Loading => None,
            _ => Some(screen),
        };
        debug!(path, ?decision, ?screen, "navigation resolved");
        Ok(Navigation {
            requested: path.to_string(),
            decision,
            screen,
        })
    }
}

//! Route guard.
//!
//! A pure decision function consulted before rendering any gated screen.

use serde::{Deserialize, Serialize};

use super::screen::{Screen, ScreenAccess};
use crate::session::SessionState;

/// Navigation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Startup restore still running: render neither content nor a redirect.
    Loading,
    Allow,
    RedirectToLogin,
    RedirectToOnboarding,
    RedirectToDashboard,
}

impl RouteDecision {
    /// Screen to navigate to instead, for redirects.
    pub fn redirect_target(self) -> Option<Screen> {
        match self {
            RouteDecision::RedirectToLogin => Some(Screen::Login),
            RouteDecision::RedirectToOnboarding => Some(Screen::Onboarding),
            RouteDecision::RedirectToDashboard => Some(Screen::Dashboard),
            RouteDecision::Loading | RouteDecision::Allow => None,
        }
    }
}

/// Policy knobs for the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardPolicy {
    /// Send authenticated users who have not finished onboarding to the wizard
    /// when they request any other protected screen.
    pub require_onboarding: bool,
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self {
            require_onboarding: true,
        }
    }
}

/// Decide whether `screen` may be rendered for `session`.
pub fn decide(session: &SessionState, screen: &Screen, policy: GuardPolicy) -> RouteDecision {
    if session.is_loading() {
        return RouteDecision::Loading;
    }

    let authenticated = session.is_authenticated();
    let onboarded = session.is_onboarded().unwrap_or(false);

    match screen.access() {
        ScreenAccess::RequiresAnon => {
            if authenticated {
                RouteDecision::RedirectToDashboard
            } else {
                RouteDecision::Allow
            }
        }
        ScreenAccess::RequiresAuthAndNotOnboarded => {
            if !authenticated {
                RouteDecision::RedirectToLogin
            } else if onboarded {
                RouteDecision::RedirectToDashboard
            } else {
                RouteDecision::Allow
            }
        }
        ScreenAccess::RequiresAuth => {
            if !authenticated {
                RouteDecision::RedirectToLogin
            } else if policy.require_onboarding && !onboarded {
                RouteDecision::RedirectToOnboarding
            } else {
                RouteDecision::Allow
            }
        }
    }
}

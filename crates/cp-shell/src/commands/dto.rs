//! Data transfer objects returned by the command handlers.
//!
//! These keep the outer surface independent of the use-case types.

use cp_app::usecases::{Navigation, WizardView};
use cp_core::onboarding::WizardState;
use cp_core::routing::RouteDecision;
use cp_core::session::SessionState;
use cp_core::user::User;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<User>,
}

impl From<&SessionState> for SessionDto {
    fn from(state: &SessionState) -> Self {
        Self {
            is_authenticated: state.is_authenticated(),
            is_loading: state.is_loading(),
            user: state.user().cloned(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardDto {
    pub complete: bool,
    pub step: Option<u8>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// "Step N of 4"
    pub position: Option<String>,
    pub recorded_steps: Vec<u8>,
    pub prefill: Option<serde_json::Value>,
}

impl From<WizardView> for WizardDto {
    fn from(view: WizardView) -> Self {
        let step = match view.state {
            WizardState::Active(step) => Some(step),
            WizardState::Complete => None,
        };
        Self {
            complete: view.state == WizardState::Complete,
            step: step.map(|s| s.index()),
            title: step.map(|s| s.title().to_string()),
            description: step.map(|s| s.description().to_string()),
            position: step.map(|s| s.position()),
            recorded_steps: view.recorded_steps.iter().map(|s| s.index()).collect(),
            prefill: view.prefill.and_then(|payload| payload.to_value().ok()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationDto {
    pub requested: String,
    pub decision: RouteDecision,
    /// Path of the screen to render; absent while the session is loading.
    pub screen: Option<String>,
}

impl From<Navigation> for NavigationDto {
    fn from(navigation: Navigation) -> Self {
        Self {
            requested: navigation.requested,
            decision: navigation.decision,
            screen: navigation.screen.map(|screen| screen.path()),
        }
    }
}

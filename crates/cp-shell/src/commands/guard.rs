//! Route guard check shared by the command handlers.

use cp_app::App;
use cp_core::routing::{RouteDecision, Screen};

/// Refuse a command whose screen the guard would not render for the current
/// session.
pub(super) async fn ensure_reachable(app: &App, screen: &Screen) -> Result<(), String> {
    match app.navigator().decide(screen).await {
        RouteDecision::Allow => Ok(()),
        decision => Err(match decision.redirect_target() {
            Some(target) => format!(
                "{} is not available, go to {}",
                screen.path(),
                target.path()
            ),
            None => "session is still loading".to_string(),
        }),
    }
}

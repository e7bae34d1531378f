use serde::Serialize;

/// Access requirement attached to a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenAccess {
    RequiresAuth,
    RequiresAnon,
    RequiresAuthAndNotOnboarded,
}

/// Named screens of the application.
///
/// `Tools` and `Sessions` carry the optional sub-path below their prefix
/// (`/tools/strategy-canvas` → `Tools(Some("strategy-canvas"))`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "screen", content = "sub_path")]
pub enum Screen {
    Login,
    Signup,
    ResetPassword,
    Onboarding,
    Dashboard,
    Tools(Option<String>),
    Sessions(Option<String>),
    Analytics,
    Admin,
}

impl Screen {
    pub fn access(&self) -> ScreenAccess {
        match self {
            Screen::Login | Screen::Signup | Screen::ResetPassword => ScreenAccess::RequiresAnon,
            Screen::Onboarding => ScreenAccess::RequiresAuthAndNotOnboarded,
            Screen::Dashboard
            | Screen::Tools(_)
            | Screen::Sessions(_)
            | Screen::Analytics
            | Screen::Admin => ScreenAccess::RequiresAuth,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Screen::Login => "/login".to_string(),
            Screen::Signup => "/signup".to_string(),
            Screen::ResetPassword => "/reset-password".to_string(),
            Screen::Onboarding => "/onboarding".to_string(),
            Screen::Dashboard => "/dashboard".to_string(),
            Screen::Tools(None) => "/tools".to_string(),
            Screen::Tools(Some(sub)) => format!("/tools/{sub}"),
            Screen::Sessions(None) => "/sessions".to_string(),
            Screen::Sessions(Some(sub)) => format!("/sessions/{sub}"),
            Screen::Analytics => "/analytics".to_string(),
            Screen::Admin => "/admin".to_string(),
        }
    }
}

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`, which always forwards to the dashboard.
    Root,
    Screen(Screen),
}

impl Route {
    /// Resolve a path; unknown paths resolve to `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Some(Route::Root);
        }
        let trimmed = trimmed.strip_prefix('/')?;
        let (head, rest) = match trimmed.split_once('/') {
            Some((head, rest)) => (head, Some(rest.to_string()).filter(|r| !r.is_empty())),
            None => (trimmed, None),
        };
        let screen = match (head, rest) {
            ("login", None) => Screen::Login,
            ("signup", None) => Screen::Signup,
            ("reset-password", None) => Screen::ResetPassword,
            ("onboarding", None) => Screen::Onboarding,
            ("dashboard", None) => Screen::Dashboard,
            ("analytics", None) => Screen::Analytics,
            ("admin", None) => Screen::Admin,
            ("tools", sub) => Screen::Tools(sub),
            ("sessions", sub) => Screen::Sessions(sub),
            _ => return None,
        };
        Some(Route::Screen(screen))
    }
}

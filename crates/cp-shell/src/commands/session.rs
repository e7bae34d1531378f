//! Session and credential commands.

use cp_app::App;
use cp_core::auth::{Credentials, ResetConfirmation, SignupForm};
use cp_core::routing::Screen;
use tracing::{info_span, Instrument};

use super::dto::SessionDto;
use super::error::map_err;
use super::guard::ensure_reachable;

pub async fn get_session_status(app: &App) -> SessionDto {
    let state = app.session().state().await;
    SessionDto::from(&state)
}

pub async fn login(app: &App, email: String, password: String) -> Result<SessionDto, String> {
    let span = info_span!("command.session.login");
    async {
        ensure_reachable(app, &Screen::Login).await?;
        app.auth()
            .login(Credentials::new(email, password))
            .await
            .map_err(map_err)?;
        Ok(get_session_status(app).await)
    }
    .instrument(span)
    .await
}

pub async fn signup(app: &App, form: SignupForm) -> Result<SessionDto, String> {
    let span = info_span!("command.session.signup");
    async {
        ensure_reachable(app, &Screen::Signup).await?;
        app.auth().signup(form).await.map_err(map_err)?;
        Ok(get_session_status(app).await)
    }
    .instrument(span)
    .await
}

pub async fn logout(app: &App) -> Result<SessionDto, String> {
    let span = info_span!("command.session.logout");
    async {
        let state = app.session().logout().await.map_err(map_err)?;
        Ok(SessionDto::from(&state))
    }
    .instrument(span)
    .await
}

pub async fn reset_password(app: &App, email: String) -> Result<ResetConfirmation, String> {
    let span = info_span!("command.session.reset_password");
    async {
        ensure_reachable(app, &Screen::ResetPassword).await?;
        app.auth().reset_password(&email).await.map_err(map_err)
    }
    .instrument(span)
    .await
}

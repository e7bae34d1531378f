use cp_app::App;
use cp_core::auth::SignupForm;
use cp_core::config::AppConfig;
use cp_core::routing::RouteDecision;
use cp_shell::bootstrap::wire_app;
use cp_shell::commands::{navigation, onboarding, session};
use serde_json::json;
use tempfile::TempDir;

fn config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::empty();
    config.storage_path = dir.path().join("local_storage.json");
    config
}

async fn started(dir: &TempDir) -> App {
    let app = wire_app(&config(dir)).unwrap();
    app.start().await;
    app
}

fn signup_form() -> SignupForm {
    SignupForm {
        email: "a@b.com".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        first_name: "Ada".into(),
        last_name: "Byron".into(),
        invite_code: "beta2024".into(),
    }
}

#[tokio::test]
async fn demo_login_survives_process_restart() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;

    let status = session::login(&app, "demo@coachpro.com".into(), "demo123".into())
        .await
        .unwrap();
    assert!(status.is_authenticated);

    let app = started(&dir).await;
    let status = session::get_session_status(&app).await;
    assert!(status.is_authenticated);
    assert!(!status.is_loading);
    assert_eq!(status.user.unwrap().first_name, "Demo");

    let err = onboarding::get_onboarding_state(&app).await.unwrap_err();
    assert!(err.contains("/dashboard"));
}

#[tokio::test]
async fn wrong_password_reports_message() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;

    let err = session::login(&app, "demo@coachpro.com".into(), "nope".into())
        .await
        .unwrap_err();

    assert_eq!(err, "Invalid credentials");
    assert!(!session::get_session_status(&app).await.is_authenticated);
}

#[tokio::test]
async fn signup_then_onboarding_across_restarts() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;
    session::signup(&app, signup_form()).await.unwrap();

    let nav = navigation::navigate(&app, "/".into()).await.unwrap();
    assert_eq!(nav.decision, RouteDecision::RedirectToOnboarding);
    assert_eq!(nav.screen.as_deref(), Some("/onboarding"));

    let state = onboarding::get_onboarding_state(&app).await.unwrap();
    assert_eq!(state.step, Some(1));
    assert_eq!(state.position.as_deref(), Some("Step 1 of 4"));

    let incomplete = onboarding::continue_onboarding(&app, json!({ "companyName": "Acme" })).await;
    assert!(incomplete.is_err());

    onboarding::continue_onboarding(
        &app,
        json!({
            "companyName": "Acme",
            "industry": "Technology",
            "companySize": "1-10 employees",
            "businessStage": "Startup (0-2 years)"
        }),
    )
    .await
    .unwrap();

    let app = started(&dir).await;
    let state = onboarding::get_onboarding_state(&app).await.unwrap();
    assert_eq!(state.step, Some(2));
    assert_eq!(state.recorded_steps, vec![1]);

    onboarding::continue_onboarding(
        &app,
        json!([{ "id": "g1", "title": "Revenue", "description": "Grow 30%" }]),
    )
    .await
    .unwrap();
    onboarding::continue_onboarding(
        &app,
        json!({
            "dominantStyle": "Coaching",
            "strengths": ["Empathy"],
            "developmentAreas": ["Delegation"],
            "communicationPreference": "Direct and Concise"
        }),
    )
    .await
    .unwrap();
    let step_four = onboarding::get_onboarding_state(&app).await.unwrap();
    let ranking = step_four.prefill.unwrap();
    let done = onboarding::continue_onboarding(&app, ranking).await.unwrap();
    assert!(done.complete);

    let app = started(&dir).await;
    let status = session::get_session_status(&app).await;
    assert!(status.user.unwrap().is_onboarded);
    let nav = navigation::navigate(&app, "/onboarding".into()).await.unwrap();
    assert_eq!(nav.screen.as_deref(), Some("/dashboard"));
}

#[tokio::test]
async fn logout_returns_to_login() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;
    session::signup(&app, signup_form()).await.unwrap();

    let status = session::logout(&app).await.unwrap();
    assert!(!status.is_authenticated);

    let app = started(&dir).await;
    let nav = navigation::navigate(&app, "/sessions/42".into()).await.unwrap();
    assert_eq!(nav.decision, RouteDecision::RedirectToLogin);
    assert_eq!(nav.screen.as_deref(), Some("/login"));
}

#[tokio::test]
async fn reset_password_confirms() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;

    let confirmation = session::reset_password(&app, "a@b.com".into()).await.unwrap();

    assert_eq!(confirmation.message, "Password reset email sent");
}

#[tokio::test]
async fn credential_commands_refused_while_logged_in() {
    let dir = TempDir::new().unwrap();
    let app = started(&dir).await;
    session::signup(&app, signup_form()).await.unwrap();
    let signed_up = session::get_session_status(&app).await;

    let err = session::login(&app, "demo@coachpro.com".into(), "demo123".into())
        .await
        .unwrap_err();
    assert!(err.contains("/login is not available"), "{err}");

    let err = session::signup(&app, signup_form()).await.unwrap_err();
    assert!(err.contains("/signup is not available"), "{err}");

    let err = session::reset_password(&app, "a@b.com".into()).await.unwrap_err();
    assert!(err.contains("/reset-password"), "{err}");

    let status = session::get_session_status(&app).await;
    assert_eq!(status.user, signed_up.user);
}

//! Onboarding wizard commands.
//!
//! Every handler first asks the route guard whether the wizard screen may be
//! shown, so anonymous or already onboarded users are turned away here.

use cp_app::App;
use cp_core::onboarding::StepPayload;
use cp_core::routing::Screen;
use tracing::{info_span, Instrument};

use super::dto::WizardDto;
use super::error::map_err;
use super::guard::ensure_reachable;

async fn ensure_wizard_reachable(app: &App) -> Result<(), String> {
    ensure_reachable(app, &Screen::Onboarding).await
}

/// Enter the wizard and return its current step.
pub async fn get_onboarding_state(app: &App) -> Result<WizardDto, String> {
    let span = info_span!("command.onboarding.get_state");
    async {
        ensure_wizard_reachable(app).await?;
        let view = app.wizard().enter().await.map_err(map_err)?;
        Ok(WizardDto::from(view))
    }
    .instrument(span)
    .await
}

/// Submit `payload` as the current step's form.
pub async fn continue_onboarding(
    app: &App,
    payload: serde_json::Value,
) -> Result<WizardDto, String> {
    let span = info_span!("command.onboarding.continue");
    async {
        ensure_wizard_reachable(app).await?;
        let wizard = app.wizard();
        let step = wizard
            .current()
            .await
            .map_err(map_err)?
            .state
            .step()
            .ok_or_else(|| "onboarding already completed".to_string())?;
        let payload = StepPayload::from_value(step, payload)
            .map_err(|e| format!("invalid data for step {}: {e}", step.index()))?;
        let view = wizard.continue_step(payload).await.map_err(map_err)?;
        Ok(WizardDto::from(view))
    }
    .instrument(span)
    .await
}

pub async fn onboarding_back(app: &App) -> Result<WizardDto, String> {
    let span = info_span!("command.onboarding.back");
    async {
        ensure_wizard_reachable(app).await?;
        let view = app.wizard().back().await.map_err(map_err)?;
        Ok(WizardDto::from(view))
    }
    .instrument(span)
    .await
}

/// Discard saved progress.
pub async fn abandon_onboarding(app: &App) -> Result<(), String> {
    let span = info_span!("command.onboarding.abandon");
    async {
        ensure_wizard_reachable(app).await?;
        app.wizard().abandon().await.map_err(map_err)
    }
    .instrument(span)
    .await
}

//! Onboarding wizard state machine.
//!
//! Defines a pure state transition function for the four-step intake flow.
//! Side effects are returned as [`WizardAction`]s and executed, in order, by
//! the application layer before the new state is published.

use serde::Serialize;

use super::draft::OnboardingDraft;
use super::model::OnboardingAggregate;
use super::progress::StepProgress;
use super::step::{OnboardingStep, StepPayload};
use super::validation::StepValidationError;

/// Wizard flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "step")]
pub enum WizardState {
    /// Collecting the payload of a step.
    Active(OnboardingStep),
    /// Terminal; never re-entered.
    Complete,
}

impl WizardState {
    /// State a (re)entered wizard starts in, derived from persisted progress.
    pub fn resume(progress: &StepProgress) -> Self {
        WizardState::Active(progress.resume_step())
    }

    pub fn step(&self) -> Option<OnboardingStep> {
        match self {
            WizardState::Active(step) => Some(*step),
            WizardState::Complete => None,
        }
    }
}

/// Events that drive the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// Submit the current step's form.
    Continue(StepPayload),
    /// Return to the previous step without touching data.
    Back,
}

/// Side effects produced by wizard transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Persist the payload under its step index.
    SaveStep(StepPayload),
    /// Fold the payload into the in-memory running aggregate.
    MergeIntoDraft(StepPayload),
    /// Write the completed aggregate as one unit.
    CommitAggregate(OnboardingAggregate),
    /// Flip the session user's onboarding flag.
    MarkUserOnboarded,
    /// Delete persisted step progress.
    ClearProgress,
    /// Tell navigation the user is now fully onboarded.
    NotifyCompleted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("step {} is incomplete: {source}", .step.index())]
    Incomplete {
        step: OnboardingStep,
        #[source]
        source: StepValidationError,
    },
    #[error("payload for step {} submitted while on step {}", .got.index(), .expected.index())]
    StepMismatch {
        expected: OnboardingStep,
        got: OnboardingStep,
    },
    #[error("onboarding already completed")]
    AlreadyComplete,
    #[error("cannot complete onboarding, missing steps: {0:?}")]
    MissingSteps(Vec<OnboardingStep>),
}

/// Pure wizard state machine.
pub struct WizardStateMachine;

impl WizardStateMachine {
    /// Compute the next state and the actions that must succeed before it is
    /// published. A rejected event leaves state and storage unchanged.
    pub fn transition(
        state: WizardState,
        draft: &OnboardingDraft,
        event: WizardEvent,
    ) -> Result<(WizardState, Vec<WizardAction>), WizardError> {
        let current = match state {
            WizardState::Active(step) => step,
            WizardState::Complete => return Err(WizardError::AlreadyComplete),
        };

        match event {
            WizardEvent::Back => {
                let previous = current.previous().unwrap_or(current);
                Ok((WizardState::Active(previous), Vec::new()))
            }
            WizardEvent::Continue(payload) => {
                if payload.step() != current {
                    return Err(WizardError::StepMismatch {
                        expected: current,
                        got: payload.step(),
                    });
                }
                payload
                    .validate()
                    .map_err(|source| WizardError::Incomplete {
                        step: current,
                        source,
                    })?;
                let payload = payload.normalized();

                match current.next() {
                    Some(next) => Ok((
                        WizardState::Active(next),
                        vec![
                            WizardAction::SaveStep(payload.clone()),
                            WizardAction::MergeIntoDraft(payload),
                        ],
                    )),
                    None => {
                        let mut completed = draft.clone();
                        completed.merge(payload.clone());
                        let aggregate = completed
                            .to_aggregate()
                            .map_err(WizardError::MissingSteps)?;
                        Ok((
                            WizardState::Complete,
                            vec![
                                WizardAction::MergeIntoDraft(payload),
                                WizardAction::CommitAggregate(aggregate),
                                WizardAction::MarkUserOnboarded,
                                WizardAction::ClearProgress,
                                WizardAction::NotifyCompleted,
                            ],
                        ))
                    }
                }
            }
        }
    }
}

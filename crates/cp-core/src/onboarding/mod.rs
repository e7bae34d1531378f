//! Onboarding domain models
//!
//! This module defines the four-step intake wizard: the payload shapes
//! collected by each step, their completeness rules, the persisted progress
//! mapping and the pure state machine that drives the flow.

pub mod draft;
pub mod model;
pub mod progress;
pub mod step;
pub mod validation;
pub mod wizard;

pub use draft::OnboardingDraft;
pub use model::{
    BusinessProfile, CompletedOnboarding, Goal, GoalPriority, LeadershipStyle,
    OnboardingAggregate, ResourcePriority, RESOURCE_CATEGORIES,
};
pub use progress::StepProgress;
pub use step::{OnboardingStep, StepPayload};
pub use validation::StepValidationError;
pub use wizard::{WizardAction, WizardError, WizardEvent, WizardState, WizardStateMachine};

//! Running aggregate kept by the wizard between steps.

use super::model::{BusinessProfile, Goal, LeadershipStyle, OnboardingAggregate, ResourcePriority};
use super::progress::StepProgress;
use super::step::{OnboardingStep, StepPayload};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnboardingDraft {
    pub business_profile: Option<BusinessProfile>,
    pub goals: Option<Vec<Goal>>,
    pub leadership_style: Option<LeadershipStyle>,
    pub resource_priorities: Option<Vec<ResourcePriority>>,
}

impl OnboardingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the draft from persisted progress.
    ///
    /// Entries that do not decode to their step's shape are skipped.
    pub fn from_progress(progress: &StepProgress) -> Self {
        let mut draft = Self::new();
        for step in progress.recorded_steps() {
            if let Some(payload) = progress.payload(step) {
                draft.merge(payload);
            }
        }
        draft
    }

    /// Store `payload` in its step's slot, replacing any previous value.
    pub fn merge(&mut self, payload: StepPayload) {
        match payload {
            StepPayload::BusinessProfile(profile) => self.business_profile = Some(profile),
            StepPayload::Goals(goals) => self.goals = Some(goals),
            StepPayload::LeadershipStyle(style) => self.leadership_style = Some(style),
            StepPayload::ResourcePriorities(priorities) => {
                self.resource_priorities = Some(priorities)
            }
        }
    }

    /// Previously entered data for `step`, used to pre-fill its form.
    pub fn payload(&self, step: OnboardingStep) -> Option<StepPayload> {
        match step {
            OnboardingStep::BusinessProfile => self
                .business_profile
                .clone()
                .map(StepPayload::BusinessProfile),
            OnboardingStep::Goals => self.goals.clone().map(StepPayload::Goals),
            OnboardingStep::LeadershipStyle => self
                .leadership_style
                .clone()
                .map(StepPayload::LeadershipStyle),
            OnboardingStep::ResourcePriorities => self
                .resource_priorities
                .clone()
                .map(StepPayload::ResourcePriorities),
        }
    }

    pub fn has(&self, step: OnboardingStep) -> bool {
        match step {
            OnboardingStep::BusinessProfile => self.business_profile.is_some(),
            OnboardingStep::Goals => self.goals.is_some(),
            OnboardingStep::LeadershipStyle => self.leadership_style.is_some(),
            OnboardingStep::ResourcePriorities => self.resource_priorities.is_some(),
        }
    }

    pub fn missing_steps(&self) -> Vec<OnboardingStep> {
        OnboardingStep::ALL
            .into_iter()
            .filter(|step| !self.has(*step))
            .collect()
    }

    /// Assemble the aggregate, or report which steps are still missing.
    pub fn to_aggregate(&self) -> Result<OnboardingAggregate, Vec<OnboardingStep>> {
        match (
            &self.business_profile,
            &self.goals,
            &self.leadership_style,
            &self.resource_priorities,
        ) {
            (Some(business_profile), Some(goals), Some(leadership_style), Some(resource_priorities)) => {
                Ok(OnboardingAggregate {
                    business_profile: business_profile.clone(),
                    goals: goals.clone(),
                    leadership_style: leadership_style.clone(),
                    resource_priorities: resource_priorities.clone(),
                })
            }
            _ => Err(self.missing_steps()),
        }
    }
}

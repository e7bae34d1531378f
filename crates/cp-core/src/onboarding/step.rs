//! Wizard steps and their payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::{BusinessProfile, Goal, LeadershipStyle, ResourcePriority};
use super::validation::{self, StepValidationError};

/// One of the four intake steps, in flow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    BusinessProfile,
    Goals,
    LeadershipStyle,
    ResourcePriorities,
}

impl OnboardingStep {
    pub const TOTAL: u8 = 4;

    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::BusinessProfile,
        OnboardingStep::Goals,
        OnboardingStep::LeadershipStyle,
        OnboardingStep::ResourcePriorities,
    ];

    /// 1-based index used as the progress key.
    pub fn index(self) -> u8 {
        match self {
            OnboardingStep::BusinessProfile => 1,
            OnboardingStep::Goals => 2,
            OnboardingStep::LeadershipStyle => 3,
            OnboardingStep::ResourcePriorities => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(OnboardingStep::BusinessProfile),
            2 => Some(OnboardingStep::Goals),
            3 => Some(OnboardingStep::LeadershipStyle),
            4 => Some(OnboardingStep::ResourcePriorities),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        Self::from_index(self.index().saturating_sub(1))
    }

    pub fn is_last(self) -> bool {
        self == OnboardingStep::ResourcePriorities
    }

    pub fn label(self) -> &'static str {
        match self {
            OnboardingStep::BusinessProfile => "Business Profile",
            OnboardingStep::Goals => "Goals Assessment",
            OnboardingStep::LeadershipStyle => "Leadership Style",
            OnboardingStep::ResourcePriorities => "Resource Priorities",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            OnboardingStep::BusinessProfile => "Tell us about your business",
            OnboardingStep::Goals => "What are your goals?",
            OnboardingStep::LeadershipStyle => "Assess your leadership style",
            OnboardingStep::ResourcePriorities => "Prioritize your resource needs",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OnboardingStep::BusinessProfile => {
                "Help us understand your company and industry so we can provide personalized coaching."
            }
            OnboardingStep::Goals => {
                "Define the key objectives you want to achieve with business coaching."
            }
            OnboardingStep::LeadershipStyle => {
                "Understanding your leadership approach helps us tailor our coaching methods."
            }
            OnboardingStep::ResourcePriorities => {
                "Rank these business areas by importance to focus your coaching sessions."
            }
        }
    }

    /// "Step N of 4".
    pub fn position(self) -> String {
        format!("Step {} of {}", self.index(), Self::TOTAL)
    }
}

/// Data collected by one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepPayload {
    BusinessProfile(BusinessProfile),
    Goals(Vec<Goal>),
    LeadershipStyle(LeadershipStyle),
    ResourcePriorities(Vec<ResourcePriority>),
}

impl StepPayload {
    pub fn step(&self) -> OnboardingStep {
        match self {
            StepPayload::BusinessProfile(_) => OnboardingStep::BusinessProfile,
            StepPayload::Goals(_) => OnboardingStep::Goals,
            StepPayload::LeadershipStyle(_) => OnboardingStep::LeadershipStyle,
            StepPayload::ResourcePriorities(_) => OnboardingStep::ResourcePriorities,
        }
    }

    /// The step's minimal-completeness predicate.
    pub fn validate(&self) -> Result<(), StepValidationError> {
        match self {
            StepPayload::BusinessProfile(profile) => validation::validate_business_profile(profile),
            StepPayload::Goals(goals) => validation::validate_goals(goals),
            StepPayload::LeadershipStyle(style) => validation::validate_leadership_style(style),
            StepPayload::ResourcePriorities(priorities) => {
                validation::validate_resource_priorities(priorities)
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }

    /// Shape submitted on `continue`: incomplete goal rows are dropped and
    /// resource priorities are renumbered in list order.
    pub fn normalized(self) -> StepPayload {
        match self {
            StepPayload::Goals(goals) => {
                StepPayload::Goals(goals.into_iter().filter(Goal::is_complete).collect())
            }
            StepPayload::ResourcePriorities(mut priorities) => {
                ResourcePriority::renumber(&mut priorities);
                StepPayload::ResourcePriorities(priorities)
            }
            other => other,
        }
    }

    /// JSON value stored under the step's progress key.
    pub fn to_value(&self) -> serde_json::Result<Value> {
        match self {
            StepPayload::BusinessProfile(profile) => serde_json::to_value(profile),
            StepPayload::Goals(goals) => serde_json::to_value(goals),
            StepPayload::LeadershipStyle(style) => serde_json::to_value(style),
            StepPayload::ResourcePriorities(priorities) => serde_json::to_value(priorities),
        }
    }

    /// Decode a stored value using the shape of `step`.
    pub fn from_value(step: OnboardingStep, value: Value) -> serde_json::Result<StepPayload> {
        Ok(match step {
            OnboardingStep::BusinessProfile => {
                StepPayload::BusinessProfile(serde_json::from_value(value)?)
            }
            OnboardingStep::Goals => StepPayload::Goals(serde_json::from_value(value)?),
            OnboardingStep::LeadershipStyle => {
                StepPayload::LeadershipStyle(serde_json::from_value(value)?)
            }
            OnboardingStep::ResourcePriorities => {
                StepPayload::ResourcePriorities(serde_json::from_value(value)?)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn index_round_trips_for_every_step() {
        for step in OnboardingStep::ALL {
            assert_eq!(OnboardingStep::from_index(step.index()), Some(step));
        }
        assert_eq!(OnboardingStep::from_index(0), None);
        assert_eq!(OnboardingStep::from_index(5), None);
    }

    #[test]
    fn next_and_previous_stop_at_the_ends() {
        assert_eq!(OnboardingStep::BusinessProfile.previous(), None);
        assert_eq!(OnboardingStep::ResourcePriorities.next(), None);
        assert_eq!(
            OnboardingStep::Goals.next(),
            Some(OnboardingStep::LeadershipStyle)
        );
    }

    #[test]
    fn position_reads_step_n_of_4() {
        assert_eq!(OnboardingStep::LeadershipStyle.position(), "Step 3 of 4");
    }

    #[test]
    fn normalized_goals_drop_blank_rows() {
        let payload = StepPayload::Goals(vec![
            Goal::new("Revenue", "Grow 30%"),
            Goal::new("", ""),
            Goal::new("Hiring", "  "),
        ]);
        match payload.normalized() {
            StepPayload::Goals(goals) => {
                assert_eq!(goals.len(), 1);
                assert_eq!(goals[0].title, "Revenue");
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn from_value_uses_step_shape() {
        let payload = StepPayload::from_value(
            OnboardingStep::Goals,
            json!([{ "id": "1", "title": "Revenue", "description": "Grow", "priority": "high", "category": "" }]),
        )
        .unwrap();
        assert_eq!(payload.step(), OnboardingStep::Goals);

        let mismatched = StepPayload::from_value(OnboardingStep::Goals, json!({"companyName": "Acme"}));
        assert!(mismatched.is_err());
    }
}

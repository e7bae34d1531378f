//! Persisted step mapping.
//!
//! Stored as a JSON object keyed by step index (`{"1": {...}, "2": [...]}`).
//! Values stay untyped here; [`StepProgress::payload`] decodes one entry with
//! the shape of its step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::step::{OnboardingStep, StepPayload};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepProgress(BTreeMap<u8, Value>);

impl StepProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only keys that name a wizard step.
    ///
    /// Returns the sanitized mapping and the number of discarded entries.
    pub fn sanitized(self) -> (Self, usize) {
        let before = self.0.len();
        let kept: BTreeMap<u8, Value> = self
            .0
            .into_iter()
            .filter(|(index, _)| OnboardingStep::from_index(*index).is_some())
            .collect();
        let dropped = before - kept.len();
        (Self(kept), dropped)
    }

    /// Overwrite the entry for `step`.
    pub fn insert(&mut self, step: OnboardingStep, value: Value) {
        self.0.insert(step.index(), value);
    }

    pub fn contains(&self, step: OnboardingStep) -> bool {
        self.0.contains_key(&step.index())
    }

    pub fn get(&self, step: OnboardingStep) -> Option<&Value> {
        self.0.get(&step.index())
    }

    /// Typed payload for `step`; `None` when absent or not of the step's shape.
    pub fn payload(&self, step: OnboardingStep) -> Option<StepPayload> {
        let value = self.get(step)?.clone();
        StepPayload::from_value(step, value).ok()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn recorded_steps(&self) -> Vec<OnboardingStep> {
        self.0
            .keys()
            .filter_map(|index| OnboardingStep::from_index(*index))
            .collect()
    }

    /// Lowest step without a recorded payload.
    pub fn first_missing(&self) -> Option<OnboardingStep> {
        OnboardingStep::ALL
            .into_iter()
            .find(|step| !self.contains(*step))
    }

    /// Step a re-entered wizard resumes at.
    ///
    /// The lowest missing step, step 1 for an empty mapping, and the last step
    /// when every step already has a payload.
    pub fn resume_step(&self) -> OnboardingStep {
        self.first_missing()
            .unwrap_or(OnboardingStep::ResourcePriorities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_string_index_keys() {
        let mut progress = StepProgress::new();
        progress.insert(OnboardingStep::Goals, json!([]));
        assert_eq!(serde_json::to_string(&progress).unwrap(), r#"{"2":[]}"#);

        let parsed: StepProgress = serde_json::from_str(r#"{"1":{"companyName":"Acme"}}"#).unwrap();
        assert!(parsed.contains(OnboardingStep::BusinessProfile));
    }

    #[test]
    fn later_writes_replace_earlier_ones() {
        let mut progress = StepProgress::new();
        progress.insert(OnboardingStep::BusinessProfile, json!({"companyName": "Old"}));
        progress.insert(OnboardingStep::BusinessProfile, json!({"companyName": "New"}));
        assert_eq!(progress.len(), 1);
        assert_eq!(
            progress.get(OnboardingStep::BusinessProfile).unwrap()["companyName"],
            "New"
        );
    }

    #[test]
    fn resume_step_is_lowest_missing_index() {
        let mut progress = StepProgress::new();
        assert_eq!(progress.resume_step(), OnboardingStep::BusinessProfile);

        progress.insert(OnboardingStep::BusinessProfile, json!({}));
        progress.insert(OnboardingStep::LeadershipStyle, json!({}));
        assert_eq!(progress.resume_step(), OnboardingStep::Goals);

        progress.insert(OnboardingStep::Goals, json!([]));
        progress.insert(OnboardingStep::ResourcePriorities, json!([]));
        assert_eq!(progress.first_missing(), None);
        assert_eq!(progress.resume_step(), OnboardingStep::ResourcePriorities);
    }

    #[test]
    fn sanitized_drops_unknown_indices() {
        let parsed: StepProgress =
            serde_json::from_str(r#"{"0":{},"1":{},"7":[]}"#).unwrap();
        let (clean, dropped) = parsed.sanitized();
        assert_eq!(dropped, 2);
        assert_eq!(clean.recorded_steps(), vec![OnboardingStep::BusinessProfile]);
    }

    #[test]
    fn payload_of_wrong_shape_is_none() {
        let mut progress = StepProgress::new();
        progress.insert(OnboardingStep::Goals, json!("not a list"));
        assert!(progress.contains(OnboardingStep::Goals));
        assert!(progress.payload(OnboardingStep::Goals).is_none());
    }
}

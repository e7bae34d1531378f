//! Minimal-completeness predicates for each step.

use std::collections::HashSet;

use super::model::{BusinessProfile, Goal, LeadershipStyle, ResourcePriority};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
pub enum StepValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("at least one goal needs a title and a description")]
    NoCompleteGoal,
    #[error("select at least one strength")]
    NoStrengths,
    #[error("select at least one development area")]
    NoDevelopmentAreas,
    #[error("resource priorities cannot be empty")]
    NoPriorities,
    #[error("resource category listed twice: {0}")]
    DuplicateCategory(String),
    #[error("resource priorities must run from 1 to {expected_max} without gaps")]
    PriorityGap { expected_max: usize },
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_business_profile(profile: &BusinessProfile) -> Result<(), StepValidationError> {
    if blank(&profile.company_name) {
        return Err(StepValidationError::MissingField("company name"));
    }
    if blank(&profile.industry) {
        return Err(StepValidationError::MissingField("industry"));
    }
    if blank(&profile.company_size) {
        return Err(StepValidationError::MissingField("company size"));
    }
    if blank(&profile.business_stage) {
        return Err(StepValidationError::MissingField("business stage"));
    }
    Ok(())
}

pub fn validate_goals(goals: &[Goal]) -> Result<(), StepValidationError> {
    if goals.iter().any(Goal::is_complete) {
        Ok(())
    } else {
        Err(StepValidationError::NoCompleteGoal)
    }
}

pub fn validate_leadership_style(style: &LeadershipStyle) -> Result<(), StepValidationError> {
    if blank(&style.dominant_style) {
        return Err(StepValidationError::MissingField("dominant style"));
    }
    if style.strengths.is_empty() {
        return Err(StepValidationError::NoStrengths);
    }
    if style.development_areas.is_empty() {
        return Err(StepValidationError::NoDevelopmentAreas);
    }
    if blank(&style.communication_preference) {
        return Err(StepValidationError::MissingField("communication preference"));
    }
    Ok(())
}

pub fn validate_resource_priorities(
    priorities: &[ResourcePriority],
) -> Result<(), StepValidationError> {
    if priorities.is_empty() {
        return Err(StepValidationError::NoPriorities);
    }
    let mut seen = HashSet::new();
    for item in priorities {
        if blank(&item.category) {
            return Err(StepValidationError::MissingField("resource category"));
        }
        if !seen.insert(item.category.as_str()) {
            return Err(StepValidationError::DuplicateCategory(item.category.clone()));
        }
    }
    let mut ranks: Vec<u32> = priorities.iter().map(|item| item.priority).collect();
    ranks.sort_unstable();
    let contiguous = ranks
        .iter()
        .enumerate()
        .all(|(index, rank)| *rank == index as u32 + 1);
    if !contiguous {
        return Err(StepValidationError::PriorityGap {
            expected_max: priorities.len(),
        });
    }
    Ok(())
}

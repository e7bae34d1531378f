//! Step payload shapes and the committed aggregate.
//!
//! All payloads serialize with camelCase field names and tolerate missing
//! fields on read, so a half-filled form saved by an older session still
//! pre-fills the step it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Resource areas ranked in the last step, in their default order.
pub const RESOURCE_CATEGORIES: [&str; 8] = [
    "Financial Management",
    "Marketing & Sales",
    "Operations",
    "Human Resources",
    "Technology",
    "Product Development",
    "Customer Service",
    "Strategic Planning",
];

/// Step 1: business profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessProfile {
    pub company_name: String,
    pub industry: String,
    pub company_size: String,
    pub business_stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPriority {
    High,
    #[default]
    Medium,
    Low,
}

/// Step 2: a single goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: GoalPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
    pub category: String,
}

impl Goal {
    /// Empty goal row with a fresh id and medium priority.
    pub fn blank() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            ..Self::default()
        }
    }

    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::blank()
        }
    }

    /// A goal counts once both title and description hold non-blank text.
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty() && !self.description.trim().is_empty()
    }
}

/// Step 3: leadership profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadershipStyle {
    pub dominant_style: String,
    pub strengths: Vec<String>,
    pub development_areas: Vec<String>,
    pub communication_preference: String,
}

impl LeadershipStyle {
    /// Add `strength` if absent, remove it if present.
    pub fn toggle_strength(&mut self, strength: &str) {
        toggle(&mut self.strengths, strength);
    }

    pub fn toggle_development_area(&mut self, area: &str) {
        toggle(&mut self.development_areas, area);
    }
}

fn toggle(items: &mut Vec<String>, value: &str) {
    if let Some(pos) = items.iter().position(|item| item == value) {
        items.remove(pos);
    } else {
        items.push(value.to_string());
    }
}

/// Step 4: one ranked resource area. `priority` 1 is the most important.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResourcePriority {
    pub category: String,
    pub priority: u32,
    pub reasoning: String,
}

impl ResourcePriority {
    /// Every resource category ranked in its catalogue order.
    pub fn default_ranking() -> Vec<ResourcePriority> {
        RESOURCE_CATEGORIES
            .iter()
            .enumerate()
            .map(|(index, category)| ResourcePriority {
                category: (*category).to_string(),
                priority: index as u32 + 1,
                reasoning: String::new(),
            })
            .collect()
    }

    /// Move the entry at `from` to `to` and renumber priorities from 1.
    ///
    /// Out-of-range indices leave the list untouched and return `false`.
    pub fn move_entry(list: &mut Vec<ResourcePriority>, from: usize, to: usize) -> bool {
        if from >= list.len() || to >= list.len() {
            return false;
        }
        let moved = list.remove(from);
        list.insert(to, moved);
        Self::renumber(list);
        true
    }

    pub fn renumber(list: &mut [ResourcePriority]) {
        for (index, item) in list.iter_mut().enumerate() {
            item.priority = index as u32 + 1;
        }
    }
}

/// The committed intake record, one field per wizard step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingAggregate {
    pub business_profile: BusinessProfile,
    pub goals: Vec<Goal>,
    pub leadership_style: LeadershipStyle,
    pub resource_priorities: Vec<ResourcePriority>,
}

/// Aggregate as written under the onboarding-complete key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedOnboarding {
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub data: OnboardingAggregate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ranking_covers_all_categories() {
        let ranking = ResourcePriority::default_ranking();
        assert_eq!(ranking.len(), RESOURCE_CATEGORIES.len());
        assert_eq!(ranking[0].category, "Financial Management");
        assert_eq!(ranking[0].priority, 1);
        assert_eq!(ranking[7].priority, 8);
    }

    #[test]
    fn move_entry_renumbers() {
        let mut ranking = ResourcePriority::default_ranking();
        assert!(ResourcePriority::move_entry(&mut ranking, 4, 0));
        assert_eq!(ranking[0].category, "Technology");
        assert_eq!(ranking[1].category, "Financial Management");
        let priorities: Vec<u32> = ranking.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn move_entry_out_of_range_is_rejected() {
        let mut ranking = ResourcePriority::default_ranking();
        let before = ranking.clone();
        assert!(!ResourcePriority::move_entry(&mut ranking, 0, 8));
        assert_eq!(ranking, before);
    }

    #[test]
    fn goal_completeness_ignores_whitespace() {
        assert!(!Goal::new("  ", "grow revenue").is_complete());
        assert!(!Goal::new("Revenue", "").is_complete());
        assert!(Goal::new("Revenue", "Grow 30%").is_complete());
    }

    #[test]
    fn blank_goals_get_distinct_ids() {
        assert_ne!(Goal::blank().id, Goal::blank().id);
        assert_eq!(Goal::blank().priority, GoalPriority::Medium);
    }

    #[test]
    fn toggle_strength_adds_then_removes() {
        let mut style = LeadershipStyle::default();
        style.toggle_strength("Empathy");
        assert_eq!(style.strengths, vec!["Empathy".to_string()]);
        style.toggle_strength("Empathy");
        assert!(style.strengths.is_empty());
    }

    #[test]
    fn partial_business_profile_decodes() {
        let profile: BusinessProfile =
            serde_json::from_str(r#"{"companyName":"Acme"}"#).unwrap();
        assert_eq!(profile.company_name, "Acme");
        assert!(profile.industry.is_empty());
        assert!(profile.website.is_none());
    }

    #[test]
    fn completed_record_flattens_aggregate() {
        let record = CompletedOnboarding {
            user_id: UserId::new("9"),
            completed_at: Utc::now(),
            data: OnboardingAggregate {
                business_profile: BusinessProfile::default(),
                goals: vec![],
                leadership_style: LeadershipStyle::default(),
                resource_priorities: vec![],
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["userId"], "9");
        assert!(json.get("businessProfile").is_some());
        assert!(json.get("resourcePriorities").is_some());
    }
}

//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Client,
    Coach,
    Admin,
}

/// Identity and status record of an account.
///
/// Persisted as JSON under the session key, field names in camelCase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub is_onboarded: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// A freshly signed-up client that still has to go through onboarding.
    pub fn new_client(
        id: UserId,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: Role::Client,
            is_onboarded: false,
            created_at,
            last_login: None,
        }
    }

    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Copy of this user with the onboarding flag set.
    pub fn onboarded(&self) -> Self {
        Self {
            is_onboarded: true,
            ..self.clone()
        }
    }

    pub fn with_last_login(mut self, at: DateTime<Utc>) -> Self {
        self.last_login = Some(at);
        self
    }
}

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque user identifier.
///
/// Accounts created by signup use the creation time in milliseconds, the demo
/// account uses `"1"`. Nothing in the core parses the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an id from a millisecond timestamp.
    pub fn from_timestamp_ms(ms: i64) -> Self {
        Self(ms.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

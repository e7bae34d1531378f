//! Key-value store port
//!
//! The process-local durable store behind the session and onboarding data.
//! String keys, string (JSON) values, last write wins, no transactions and
//! no key enumeration. Every caller owns its keys independently.

/// Serialized [`crate::user::User`] of the authenticated session.
pub const SESSION_AUTH_KEY: &str = "coach_pro_auth";

/// Step index → payload mapping of an unfinished wizard.
pub const ONBOARDING_PROGRESS_KEY: &str = "coach_pro_onboarding";

/// Committed [`crate::onboarding::CompletedOnboarding`] record.
pub const ONBOARDING_COMPLETE_KEY: &str = "coach_pro_onboarding_complete";

pub trait KeyValueStorePort: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}

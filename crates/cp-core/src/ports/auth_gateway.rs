//! Authentication boundary port
//!
//! The remote side of login, signup and password reset. Implementations may
//! take arbitrarily long to resolve; a failed call is reported once and never
//! retried.

use async_trait::async_trait;

use crate::auth::{AuthError, ResetConfirmation, SignupRequest};
use crate::user::User;

#[async_trait]
pub trait AuthGatewayPort: Send + Sync {
    /// Exchange credentials for the account's user record.
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Create an account. New users always start with `is_onboarded = false`.
    async fn signup(&self, request: &SignupRequest) -> Result<User, AuthError>;

    /// Request a password reset email.
    async fn reset_password(&self, email: &str) -> Result<ResetConfirmation, AuthError>;
}

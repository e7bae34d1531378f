//! Authentication domain module.
//!
//! Credential and signup form types, their client-side validation, and the
//! errors reported by the authentication boundary.

pub mod invite;

use serde::{Deserialize, Serialize};

pub use invite::{is_valid_invite_code, INVITE_CODES};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Errors reported to the action that initiated an authentication call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Invalid invite code")]
    InvalidInviteCode,
    #[error("Invite code is required")]
    InviteCodeRequired,
    #[error("Password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }
        Ok(())
    }
}

/// Signup form as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub invite_code: String,
}

impl SignupForm {
    /// Client-side checks run before the request leaves the form.
    ///
    /// The invite code is only checked for presence here; the allow-list is
    /// enforced by the authentication boundary.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.first_name.trim().is_empty() {
            return Err(AuthError::MissingField("first name"));
        }
        if self.last_name.trim().is_empty() {
            return Err(AuthError::MissingField("last name"));
        }
        if self.email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min_len: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if self.invite_code.trim().is_empty() {
            return Err(AuthError::InviteCodeRequired);
        }
        Ok(())
    }

    pub fn into_request(self) -> SignupRequest {
        SignupRequest {
            email: self.email.trim().to_string(),
            password: self.password,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            invite_code: self.invite_code.trim().to_string(),
        }
    }
}

/// Signup call sent to the authentication boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub invite_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetConfirmation {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignupForm {
        SignupForm {
            email: "a@b.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            invite_code: "beta2024".into(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn short_password_is_rejected() {
        let mut f = form();
        f.password = "12345".into();
        f.confirm_password = "12345".into();
        assert_eq!(
            f.validate(),
            Err(AuthError::PasswordTooShort { min_len: 6 })
        );
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut f = form();
        f.confirm_password = "secret2".into();
        assert_eq!(f.validate(), Err(AuthError::PasswordMismatch));
    }

    #[test]
    fn blank_invite_code_is_rejected() {
        let mut f = form();
        f.invite_code = "   ".into();
        assert_eq!(f.validate(), Err(AuthError::InviteCodeRequired));
    }

    #[test]
    fn into_request_trims_text_fields() {
        let mut f = form();
        f.email = "  a@b.com ".into();
        let request = f.into_request();
        assert_eq!(request.email, "a@b.com");
        assert_eq!(request.invite_code, "beta2024");
    }

    #[test]
    fn credentials_require_both_fields() {
        assert_eq!(
            Credentials::new("", "x").validate(),
            Err(AuthError::MissingField("email"))
        );
        assert!(Credentials::new("demo@coachpro.com", "demo123").validate().is_ok());
    }
}

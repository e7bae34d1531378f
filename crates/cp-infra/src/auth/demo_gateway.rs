//! Offline authentication gateway.
//!
//! Stands in for a remote authentication service: one fixed demo account,
//! signup gated by the invite allow-list and a password reset that always
//! succeeds. Every call resolves after a configurable delay.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cp_core::auth::{is_valid_invite_code, AuthError, ResetConfirmation, SignupRequest};
use cp_core::ids::UserId;
use cp_core::ports::{AuthGatewayPort, ClockPort};
use cp_core::user::{Role, User};
use tracing::{debug, info_span, Instrument};

pub const DEMO_EMAIL: &str = "demo@coachpro.com";
pub const DEMO_PASSWORD: &str = "demo123";
const DEMO_USER_ID: &str = "1";
const RESET_MESSAGE: &str = "Password reset email sent";

pub struct DemoAuthGateway {
    latency: Duration,
    clock: Arc<dyn ClockPort>,
}

impl DemoAuthGateway {
    pub fn new(latency: Duration, clock: Arc<dyn ClockPort>) -> Self {
        Self { latency, clock }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn demo_user(&self) -> User {
        User {
            id: UserId::new(DEMO_USER_ID),
            email: DEMO_EMAIL.to_string(),
            first_name: "Demo".to_string(),
            last_name: "User".to_string(),
            role: Role::Client,
            is_onboarded: true,
            created_at: self.clock.now(),
            last_login: None,
        }
    }
}

#[async_trait]
impl AuthGatewayPort for DemoAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        async {
            self.simulate_latency().await;

            if email == DEMO_EMAIL && password == DEMO_PASSWORD {
                debug!("demo credentials accepted");
                return Ok(self.demo_user());
            }

            debug!("credentials rejected");
            Err(AuthError::InvalidCredentials)
        }
        .instrument(info_span!("infra.auth.login"))
        .await
    }

    async fn signup(&self, request: &SignupRequest) -> Result<User, AuthError> {
        async {
            self.simulate_latency().await;

            if !is_valid_invite_code(&request.invite_code) {
                debug!("invite code rejected");
                return Err(AuthError::InvalidInviteCode);
            }

            let now = self.clock.now();
            let user = User::new_client(
                UserId::from_timestamp_ms(self.clock.now_ms()),
                request.email.clone(),
                request.first_name.clone(),
                request.last_name.clone(),
                now,
            );
            debug!(user_id = %user.id, "account created");
            Ok(user)
        }
        .instrument(info_span!("infra.auth.signup"))
        .await
    }

    async fn reset_password(&self, _email: &str) -> Result<ResetConfirmation, AuthError> {
        async {
            self.simulate_latency().await;
            Ok(ResetConfirmation {
                message: RESET_MESSAGE.to_string(),
            })
        }
        .instrument(info_span!("infra.auth.reset_password"))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(i64);

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            self.0
        }
    }

    fn gateway() -> DemoAuthGateway {
        DemoAuthGateway::new(Duration::ZERO, Arc::new(FixedClock(1_700_000_000_000)))
    }

    fn request(code: &str) -> SignupRequest {
        SignupRequest {
            email: "new@coachpro.com".into(),
            password: "secret1".into(),
            first_name: "New".into(),
            last_name: "Client".into(),
            invite_code: code.into(),
        }
    }

    #[tokio::test]
    async fn demo_credentials_return_onboarded_demo_user() {
        let user = gateway().login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

        assert_eq!(user.id.as_str(), "1");
        assert_eq!(user.display_name(), "Demo User");
        assert_eq!(user.role, Role::Client);
        assert!(user.is_onboarded);
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let result = gateway().login(DEMO_EMAIL, "nope").await;
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn signup_creates_non_onboarded_user_with_clock_id() {
        let user = gateway().signup(&request("coach2024")).await.unwrap();

        assert_eq!(user.id.as_str(), "1700000000000");
        assert_eq!(user.email, "new@coachpro.com");
        assert!(!user.is_onboarded);
        assert_eq!(user.last_login, None);
    }

    #[tokio::test]
    async fn signup_with_unknown_invite_code_fails() {
        let result = gateway().signup(&request("NOPE2024")).await;
        assert_eq!(result, Err(AuthError::InvalidInviteCode));
    }

    #[tokio::test]
    async fn reset_password_always_confirms() {
        let confirmation = gateway().reset_password("anyone@x.com").await.unwrap();
        assert_eq!(confirmation.message, "Password reset email sent");
    }

    #[tokio::test(start_paused = true)]
    async fn calls_wait_for_configured_latency() {
        let gateway = DemoAuthGateway::new(Duration::from_millis(1000), Arc::new(FixedClock(0)));
        let started = tokio::time::Instant::now();

        gateway.reset_password("a@b.com").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
    }
}

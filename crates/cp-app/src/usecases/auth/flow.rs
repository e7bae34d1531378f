//! Credential flows: login, signup and password reset.
//!
//! Only one call to the authentication boundary may be in flight; a second
//! one is refused with [`AuthFlowError::Busy`]. A response that arrives after
//! [`AuthFlow::cancel_pending`] (the user navigated away) is dropped as
//! [`AuthFlowError::Stale`] and never reaches the session. The same happens
//! when the session itself changed while the call was pending, e.g. an
//! explicit logout.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use cp_core::auth::{AuthError, Credentials, ResetConfirmation, SignupForm};
use cp_core::ports::{AuthGatewayPort, ClockPort};
use cp_core::user::User;
use tracing::{info, info_span, warn, Instrument};

use crate::usecases::session::{SessionError, SessionManager};

#[derive(Debug, thiserror::Error)]
pub enum AuthFlowError {
    #[error("another authentication request is in progress")]
    Busy,
    #[error("authentication response discarded after navigation")]
    Stale,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Clears the in-flight flag when the call ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

/// What a call saw when it started.
#[derive(Debug, Clone, Copy)]
struct Ticket {
    generation: u64,
    session_revision: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct AuthFlow {
    session: Arc<SessionManager>,
    gateway: Arc<dyn AuthGatewayPort>,
    clock: Arc<dyn ClockPort>,
    in_flight: AtomicBool,
    generation: AtomicU64,
}

impl AuthFlow {
    pub fn new(
        session: Arc<SessionManager>,
        gateway: Arc<dyn AuthGatewayPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            session,
            gateway,
            clock,
            in_flight: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Exchange credentials for a user and log them in, stamping `last_login`.
    pub async fn login(&self, credentials: Credentials) -> Result<User, AuthFlowError> {
        credentials.validate()?;
        let span = info_span!("usecase.auth.login");
        async {
            let (_in_flight, ticket) = self.begin()?;
            let result = self
                .gateway
                .login(credentials.email.trim(), &credentials.password)
                .await;
            self.ensure_current(ticket)?;

            let user = result.inspect_err(|err| warn!(error = %err, "login rejected"))?;
            let user = user.with_last_login(self.clock.now());
            self.commit_login(user.clone(), ticket).await?;
            info!(user_id = %user.id, "login succeeded");
            Ok(user)
        }
        .instrument(span)
        .await
    }

    /// Create an account and log the new user in.
    pub async fn signup(&self, form: SignupForm) -> Result<User, AuthFlowError> {
        form.validate()?;
        let request = form.into_request();
        let span = info_span!("usecase.auth.signup");
        async {
            let (_in_flight, ticket) = self.begin()?;
            let result = self.gateway.signup(&request).await;
            self.ensure_current(ticket)?;

            let user = result.inspect_err(|err| warn!(error = %err, "signup rejected"))?;
            self.commit_login(user.clone(), ticket).await?;
            info!(user_id = %user.id, "signup succeeded");
            Ok(user)
        }
        .instrument(span)
        .await
    }

    pub async fn reset_password(&self, email: &str) -> Result<ResetConfirmation, AuthFlowError> {
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email").into());
        }
        let span = info_span!("usecase.auth.reset_password");
        async {
            let (_in_flight, ticket) = self.begin()?;
            let result = self.gateway.reset_password(email.trim()).await;
            self.ensure_current(ticket)?;
            Ok(result?)
        }
        .instrument(span)
        .await
    }

    /// Invalidate every call currently in flight.
    pub fn cancel_pending(&self) {
        let previous = self.generation.fetch_add(1, Ordering::SeqCst);
        if self.in_flight.load(Ordering::SeqCst) {
            info!(generation = previous + 1, "pending authentication request cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(InFlight<'_>, Ticket), AuthFlowError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(AuthFlowError::Busy);
        }
        let ticket = Ticket {
            generation: self.generation.load(Ordering::SeqCst),
            session_revision: self.session.revision(),
        };
        Ok((InFlight(&self.in_flight), ticket))
    }

    fn ensure_current(&self, ticket: Ticket) -> Result<(), AuthFlowError> {
        if self.generation.load(Ordering::SeqCst) != ticket.generation {
            warn!("discarding stale authentication response");
            return Err(AuthFlowError::Stale);
        }
        Ok(())
    }

    async fn commit_login(&self, user: User, ticket: Ticket) -> Result<(), AuthFlowError> {
        match self
            .session
            .login_if_unchanged(user, ticket.session_revision)
            .await
        {
            Ok(_) => Ok(()),
            Err(SessionError::Superseded { .. }) => {
                warn!("discarding authentication response, session changed meanwhile");
                Err(AuthFlowError::Stale)
            }
            Err(err) => Err(err.into()),
        }
    }
}

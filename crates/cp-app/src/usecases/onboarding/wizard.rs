//! Onboarding wizard orchestrator.
//!
//! Drives [`WizardStateMachine`] against the session and the progress
//! tracker. Each dispatch runs transition, executes the returned actions in
//! order and only then publishes the new state, so a failed side effect
//! leaves the wizard where it was.
//!
//! The terminal transition commits at the session write that flips
//! `is_onboarded`. The completion record is written before it and progress
//! is cleared after it; a crash between the two is finished by
//! [`SessionManager::restore`].
//!
//! The cached snapshot only lives as long as the session revision it was
//! built at and the persisted progress it mirrors; after a logout, a new
//! login or a change to stored progress it is rebuilt from storage.

use std::sync::Arc;

use cp_core::onboarding::{
    CompletedOnboarding, OnboardingAggregate, OnboardingDraft, OnboardingStep, ResourcePriority,
    StepPayload, WizardAction, WizardError, WizardEvent, WizardState, WizardStateMachine,
};
use cp_core::ports::{ClockPort, KeyValueStorePort, ONBOARDING_COMPLETE_KEY};
use cp_core::user::User;
use cp_core::UserId;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use super::progress::{ProgressError, ProgressTracker};
use crate::usecases::session::{SessionError, SessionManager};

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("failed to persist completed onboarding: {0}")]
    Storage(#[source] anyhow::Error),
    #[error("failed to encode completed onboarding: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no authenticated user")]
    NotAuthenticated,
}

/// What the presentation layer renders for the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardView {
    pub state: WizardState,
    /// Steps that already hold a payload.
    pub recorded_steps: Vec<OnboardingStep>,
    /// Data to pre-fill the current step's form with.
    pub prefill: Option<StepPayload>,
}

#[derive(Debug, Clone)]
struct WizardSnapshot {
    owner: UserId,
    session_revision: u64,
    state: WizardState,
    draft: OnboardingDraft,
}

impl WizardSnapshot {
    fn view(&self) -> WizardView {
        let prefill = self.state.step().and_then(|step| {
            self.draft.payload(step).or_else(|| match step {
                OnboardingStep::ResourcePriorities => Some(StepPayload::ResourcePriorities(
                    ResourcePriority::default_ranking(),
                )),
                _ => None,
            })
        });
        WizardView {
            state: self.state,
            recorded_steps: OnboardingStep::ALL
                .into_iter()
                .filter(|step| self.draft.has(*step))
                .collect(),
            prefill,
        }
    }
}

pub struct OnboardingWizard {
    snapshot: Mutex<Option<WizardSnapshot>>,
    dispatch_lock: Mutex<()>,
    session: Arc<SessionManager>,
    progress: Arc<ProgressTracker>,
    store: Arc<dyn KeyValueStorePort>,
    clock: Arc<dyn ClockPort>,
}

impl OnboardingWizard {
    pub fn new(
        session: Arc<SessionManager>,
        progress: Arc<ProgressTracker>,
        store: Arc<dyn KeyValueStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            snapshot: Mutex::new(None),
            dispatch_lock: Mutex::new(()),
            session,
            progress,
            store,
            clock,
        }
    }

    /// (Re)enter the wizard, deriving the current step from persisted progress.
    pub async fn enter(&self) -> Result<WizardView, OnboardingError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        let (revision, user) = self.authenticated_user().await?;
        let snapshot = self.load_snapshot(revision, &user);
        info!(user_id = %user.id, state = ?snapshot.state, "onboarding wizard entered");
        *self.snapshot.lock().await = Some(snapshot.clone());
        Ok(snapshot.view())
    }

    pub async fn current(&self) -> Result<WizardView, OnboardingError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        let (revision, user) = self.authenticated_user().await?;
        Ok(self.snapshot_for(revision, &user).await.view())
    }

    /// Whether `payload` would be accepted by `continue_step` right now.
    pub async fn can_continue(&self, payload: &StepPayload) -> bool {
        let Ok(view) = self.current().await else {
            return false;
        };
        view.state.step() == Some(payload.step()) && payload.is_complete()
    }

    /// Submit the current step.
    pub async fn continue_step(&self, payload: StepPayload) -> Result<WizardView, OnboardingError> {
        self.dispatch(WizardEvent::Continue(payload)).await
    }

    pub async fn back(&self) -> Result<WizardView, OnboardingError> {
        self.dispatch(WizardEvent::Back).await
    }

    /// Discard all progress; the next entry starts over at step 1.
    pub async fn abandon(&self) -> Result<(), OnboardingError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;
        self.progress.clear()?;
        *self.snapshot.lock().await = None;
        info!("onboarding abandoned");
        Ok(())
    }

    async fn dispatch(&self, event: WizardEvent) -> Result<WizardView, OnboardingError> {
        let _dispatch_guard = self.dispatch_lock.lock().await;

        let (kind, step) = match &event {
            WizardEvent::Continue(payload) => ("continue", payload.step().index()),
            WizardEvent::Back => ("back", 0),
        };
        let span = info_span!("usecase.onboarding_wizard.dispatch", event = kind, step);
        async {
            let (revision, user) = self.authenticated_user().await?;
            let current = self.snapshot_for(revision, &user).await;

            let (next, actions) =
                WizardStateMachine::transition(current.state, &current.draft, event)?;
            info!(from = ?current.state, to = ?next, "onboarding wizard transition");

            let mut draft = current.draft.clone();
            self.execute_actions(&user, &mut draft, actions).await?;

            let snapshot = WizardSnapshot {
                owner: user.id,
                session_revision: revision,
                state: next,
                draft,
            };
            *self.snapshot.lock().await = Some(snapshot.clone());
            Ok(snapshot.view())
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        user: &User,
        draft: &mut OnboardingDraft,
        actions: Vec<WizardAction>,
    ) -> Result<(), OnboardingError> {
        for action in actions {
            match action {
                WizardAction::SaveStep(payload) => {
                    debug!(step = payload.step().index(), "wizard saving step");
                    self.progress.save_step(&payload)?;
                }
                WizardAction::MergeIntoDraft(payload) => {
                    draft.merge(payload);
                }
                WizardAction::CommitAggregate(aggregate) => {
                    debug!("wizard writing completion record");
                    self.write_completion(user, aggregate)?;
                }
                WizardAction::MarkUserOnboarded => {
                    debug!("wizard marking user onboarded");
                    self.session.update_user(user.onboarded()).await?;
                }
                WizardAction::ClearProgress => {
                    // Past the commit point: restore() finishes this if it fails.
                    if let Err(err) = self.progress.clear() {
                        warn!(error = %err, "failed to clear step progress after completion");
                    }
                }
                WizardAction::NotifyCompleted => {
                    info!(user_id = %user.id, "onboarding completed");
                }
            }
        }
        Ok(())
    }

    fn write_completion(
        &self,
        user: &User,
        aggregate: OnboardingAggregate,
    ) -> Result<(), OnboardingError> {
        let record = CompletedOnboarding {
            user_id: user.id.clone(),
            completed_at: self.clock.now(),
            data: aggregate,
        };
        let json = serde_json::to_string(&record)?;
        self.store
            .set(ONBOARDING_COMPLETE_KEY, &json)
            .map_err(OnboardingError::Storage)
    }

    async fn authenticated_user(&self) -> Result<(u64, User), OnboardingError> {
        let (revision, state) = self.session.revisioned_state().await;
        let user = state.user().cloned().ok_or(OnboardingError::NotAuthenticated)?;
        Ok((revision, user))
    }

    /// Cached snapshot for `user`, rebuilt from storage when the wizard has
    /// not been entered yet, belongs to another session, or no longer
    /// matches the persisted progress.
    async fn snapshot_for(&self, revision: u64, user: &User) -> WizardSnapshot {
        let mut guard = self.snapshot.lock().await;
        match guard.as_ref() {
            Some(snapshot)
                if snapshot.owner == user.id
                    && snapshot.session_revision == revision
                    && self.mirrors_persisted_progress(snapshot) =>
            {
                snapshot.clone()
            }
            _ => {
                debug!(user_id = %user.id, revision, "rebuilding wizard snapshot from storage");
                let snapshot = self.load_snapshot(revision, user);
                *guard = Some(snapshot.clone());
                snapshot
            }
        }
    }

    fn mirrors_persisted_progress(&self, snapshot: &WizardSnapshot) -> bool {
        if snapshot.state == WizardState::Complete {
            return true;
        }
        OnboardingDraft::from_progress(&self.progress.load_all()) == snapshot.draft
    }

    fn load_snapshot(&self, revision: u64, user: &User) -> WizardSnapshot {
        if user.is_onboarded {
            return WizardSnapshot {
                owner: user.id.clone(),
                session_revision: revision,
                state: WizardState::Complete,
                draft: OnboardingDraft::new(),
            };
        }
        let progress = self.progress.load_all();
        WizardSnapshot {
            owner: user.id.clone(),
            session_revision: revision,
            state: WizardState::resume(&progress),
            draft: OnboardingDraft::from_progress(&progress),
        }
    }
}

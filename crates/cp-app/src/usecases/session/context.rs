use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cp_core::session::{SessionAction, SessionState};
use tokio::sync::Mutex;

/// Shared session context containing state and dispatch lock.
///
/// The single owned [`SessionState`] of the process. Only
/// [`super::SessionManager`] dispatches into it; everyone else reads
/// snapshots.
///
/// Every applied action bumps a revision counter. Readers that cache
/// anything derived from the session compare revisions to notice that the
/// session changed underneath them.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<Mutex<SessionState>>,
    /// Only written while `state` is held.
    revision: Arc<AtomicU64>,
    /// Serializes store write + reduce so the persisted record and the
    /// in-memory state never diverge.
    dispatch_lock: Arc<Mutex<()>>,
}

impl SessionContext {
    pub fn new(initial_state: SessionState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            revision: Arc::new(AtomicU64::new(0)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Snapshot of the current state. Does NOT acquire `dispatch_lock`.
    pub async fn get_state(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// State together with the revision it was read at.
    pub async fn get_revisioned_state(&self) -> (u64, SessionState) {
        let guard = self.state.lock().await;
        (self.revision.load(Ordering::SeqCst), guard.clone())
    }

    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Fold `action` through the reducer and return the new state.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn apply(&self, action: SessionAction) -> SessionState {
        let mut guard = self.state.lock().await;
        let next = guard.clone().reduce(action);
        *guard = next.clone();
        self.revision.fetch_add(1, Ordering::SeqCst);
        next
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(SessionState::initial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_applied_action_bumps_revision() {
        let context = SessionContext::default();
        assert_eq!(context.revision(), 0);

        context.apply(SessionAction::SetLoading(false)).await;
        context.apply(SessionAction::Logout).await;

        let (revision, state) = context.get_revisioned_state().await;
        assert_eq!(revision, 2);
        assert!(!state.is_authenticated());
    }
}

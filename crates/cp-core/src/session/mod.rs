//! Session domain module.
//!
//! Holds the authentication state and the pure reducer that folds
//! [`SessionAction`]s into it.

pub mod state;

pub use state::{SessionAction, SessionPhase, SessionState};

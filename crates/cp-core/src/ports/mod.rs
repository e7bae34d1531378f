//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. The core depends only on these
//! traits; `cp-infra` provides the adapters.

pub mod auth_gateway;
mod clock;
pub mod storage;

pub use auth_gateway::AuthGatewayPort;
pub use clock::*;
pub use storage::{
    KeyValueStorePort, ONBOARDING_COMPLETE_KEY, ONBOARDING_PROGRESS_KEY, SESSION_AUTH_KEY,
};

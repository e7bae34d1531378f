//! # cp-core
//!
//! Core domain models and business logic for CoachPro.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the session reducer, the onboarding wizard state machine, the route guard and
//! the port traits implemented by `cp-infra`.

// Public module exports
pub mod auth;
pub mod config;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod routing;
pub mod session;
pub mod user;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use ids::UserId;
pub use onboarding::{OnboardingAggregate, OnboardingStep, StepPayload};
pub use routing::{RouteDecision, Screen};
pub use session::{SessionAction, SessionState};
pub use user::{Role, User};

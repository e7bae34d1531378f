//! Command handlers.
//!
//! Each handler opens a `command.*` root span, calls into the use cases and
//! maps the outcome to a serialisable DTO or a user-facing error message.
//! Handlers tied to a screen are refused when the route guard would not
//! render that screen.

pub mod dto;
pub mod error;
mod guard;
pub mod navigation;
pub mod onboarding;
pub mod session;

pub use dto::{NavigationDto, SessionDto, WizardDto};

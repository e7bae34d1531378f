//! Use cases of the CoachPro client core.
//!
//! Everything here talks to the outside world through the ports declared in
//! `cp-core`; the adapters live in `cp-infra` and are wired by `cp-shell`.

pub mod app;
pub mod deps;
pub mod usecases;

pub use app::App;
pub use deps::AppDeps;

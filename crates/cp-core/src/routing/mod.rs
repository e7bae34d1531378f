//! Routing domain module.
//!
//! Named screens, the access rule each one carries and the pure guard that
//! turns session state plus a requested screen into a navigation decision.

pub mod guard;
pub mod screen;

pub use guard::{decide, GuardPolicy, RouteDecision};
pub use screen::{Route, Screen, ScreenAccess};

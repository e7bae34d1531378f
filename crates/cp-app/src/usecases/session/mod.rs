mod context;
mod manager;

pub use context::SessionContext;
pub use manager::{SessionError, SessionManager};

pub mod auth;
pub mod storage;
pub mod time;

pub use auth::DemoAuthGateway;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
pub use time::SystemClock;

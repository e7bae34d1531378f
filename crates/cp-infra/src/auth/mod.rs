//! Authentication boundary adapters.

mod demo_gateway;

pub use demo_gateway::{DemoAuthGateway, DEMO_EMAIL, DEMO_PASSWORD};

//! Outer adapter layer: configuration, tracing, dependency wiring and the
//! command handlers the CLI dispatches to.

pub mod bootstrap;
pub mod commands;

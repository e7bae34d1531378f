//! # Dependency Injection / 依赖注入模块
//!
//! Turns an [`AppConfig`] into a ready [`App`]: file-backed store, demo
//! authentication gateway with the configured latency, and the system clock.
//!
//! Empty config values are resolved here against the default data directory.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use cp_app::{App, AppDeps};
use cp_core::config::{AppConfig, DEFAULT_STORE_FILE};
use cp_core::ports::ClockPort;
use cp_infra::{DemoAuthGateway, FileKeyValueStore, SystemClock};
use tracing::info;

const APP_DIR_NAME: &str = "coachpro";

/// `<platform data dir>/coachpro`
pub fn default_data_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::data_local_dir()
        .or_else(dirs::home_dir)
        .context("Failed to determine a data directory for this platform")?;
    Ok(base.join(APP_DIR_NAME))
}

/// Store file to use: the configured one, or the default inside the data dir.
pub fn resolve_storage_path(config: &AppConfig) -> anyhow::Result<PathBuf> {
    if config.storage_path.as_os_str().is_empty() {
        Ok(default_data_dir()?.join(DEFAULT_STORE_FILE))
    } else {
        Ok(config.storage_path.clone())
    }
}

/// Wire adapters into a new [`App`]. Does not restore the session.
pub fn wire_app(config: &AppConfig) -> anyhow::Result<App> {
    let storage_path = resolve_storage_path(config)?;
    info!(
        storage = %storage_path.display(),
        auth_latency_ms = config.auth_latency_ms,
        allow_incomplete_onboarding = config.allow_incomplete_onboarding,
        "wiring application"
    );

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock);
    let deps = AppDeps {
        store: Arc::new(FileKeyValueStore::new(storage_path)),
        auth_gateway: Arc::new(DemoAuthGateway::new(
            Duration::from_millis(config.auth_latency_ms),
            clock.clone(),
        )),
        clock,
        guard_policy: config.guard_policy(),
    };
    Ok(App::new(deps))
}

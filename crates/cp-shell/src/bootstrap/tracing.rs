//! Tracing configuration for CoachPro
//!
//! Installs the global `tracing-subscriber` once per process.
//!
//! ## Architecture / 架构
//!
//! - Command layer opens `command.*` root spans
//! - UseCase layer opens `usecase.*` child spans
//! - Infra layer adds debug events
//!
//! Output goes to stderr so command results on stdout stay machine readable.

use std::{fs, io, path::Path, sync::OnceLock};

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, registry};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_FILE_PREFIX: &str = "coachpro.log";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug level for the workspace crates
/// - **Production**: warn overall, info for the workspace crates
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        if is_dev { "debug" } else { "warn" }.to_string(),
        format!("cp_app={level}"),
        format!("cp_infra={level}"),
        format!("cp_shell={level}"),
        format!("coachpro={level}"),
    ]
}

/// Initialize the tracing subscriber
///
/// - Respects `RUST_LOG`, falling back to [`build_filter_directives`]
/// - Always logs to stderr
/// - Additionally writes a daily rolling file under `logs_dir` when given;
///   if that directory cannot be prepared, logging continues on stderr only
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(logs_dir: Option<&Path>) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter_directives.join(",")));

    let stderr_writer: BoxMakeWriter = BoxMakeWriter::new(io::stderr);
    let file_writer = match logs_dir {
        Some(dir) => match build_file_writer(dir) {
            Ok(writer) => Some(writer),
            Err(err) => {
                eprintln!("Failed to initialize file logging, falling back to stderr: {err}");
                None
            }
        },
        None => None,
    };

    // "2026-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(stderr_writer);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .with_timer(fmt::time::ChronoUtc::new(TIMESTAMP_FORMAT.to_string()))
            .with_level(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(true)
            .with_ansi(false)
            .with_writer(writer)
    });

    registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn build_file_writer(logs_dir: &Path) -> anyhow::Result<NonBlocking> {
    if logs_dir.as_os_str().is_empty() {
        anyhow::bail!("logs directory is empty");
    }
    fs::create_dir_all(logs_dir)?;

    let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Tracing log guard already initialized"))?;

    Ok(non_blocking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"debug".to_string()));
        assert!(dev_directives.contains(&"cp_app=debug".to_string()));
        assert!(dev_directives.contains(&"cp_infra=debug".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"warn".to_string()));
        assert!(prod_directives.contains(&"cp_app=info".to_string()));
        assert!(prod_directives.contains(&"cp_infra=info".to_string()));
    }

    #[test]
    fn test_empty_logs_dir_is_rejected() {
        assert!(build_file_writer(Path::new("")).is_err());
    }
}

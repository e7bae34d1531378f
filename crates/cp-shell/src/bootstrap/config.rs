//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read TOML configuration files / 读取 TOML 配置文件
//! - ✅ Parse TOML into AppConfig DTO / 将 TOML 解析为 AppConfig DTO
//! - ✅ Report I/O and parsing errors with context / 报告带上下文的 I/O 和解析错误
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No business rules / 禁止业务规则**

use anyhow::Context;
use cp_core::config::AppConfig;
use std::path::PathBuf;

use super::wiring::default_data_dir;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// Missing sections result in empty values (facts); nothing is validated.
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Config file when one is given, system defaults otherwise.
pub fn resolve_config(config_path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    match config_path {
        Some(path) => load_config(path),
        None => Ok(AppConfig::with_system_defaults(default_data_dir()?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [storage]
            path = "/tmp/coachpro/store.json"

            [auth]
            latency_ms = 250

            [routing]
            allow_incomplete_onboarding = true

            [logging]
            dir = "/tmp/coachpro/logs"
        "#,
        );

        let config = load_config(file.path().to_path_buf()).unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/coachpro/store.json"));
        assert_eq!(config.auth_latency_ms, 250);
        assert!(config.allow_incomplete_onboarding);
        assert_eq!(config.logs_dir, PathBuf::from("/tmp/coachpro/logs"));
    }

    /// Missing values result in empty values
    /// 缺失的值导致空值
    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let file = write_config("[storage]\n");

        let config = load_config(file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_reports_invalid_toml() {
        let file = write_config("[storage\npath = ");

        let err = load_config(file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(PathBuf::from("/nonexistent/coachpro.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }
}

//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic or policies / 禁止任何业务逻辑或策略**
//! ❌ **No validation logic / 禁止验证逻辑**
//!
//! Missing keys map to empty values; an empty value is a fact, not an error.

use std::path::PathBuf;

use crate::routing::GuardPolicy;

/// Latency applied to every mock authentication call in production defaults.
pub const DEFAULT_AUTH_LATENCY_MS: u64 = 1000;

/// File name of the key-value store inside the data directory.
pub const DEFAULT_STORE_FILE: &str = "local_storage.json";

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// JSON file backing the key-value store (no existence check)
    pub storage_path: PathBuf,

    /// Directory for rolling log files; empty disables file logging
    pub logs_dir: PathBuf,

    /// Artificial delay before each authentication call resolves
    pub auth_latency_ms: u64,

    /// Let authenticated users who have not finished onboarding reach
    /// protected screens other than the wizard
    pub allow_incomplete_onboarding: bool,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            storage_path: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("path"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            logs_dir: PathBuf::from(
                toml_value
                    .get("logging")
                    .and_then(|l| l.get("dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            auth_latency_ms: toml_value
                .get("auth")
                .and_then(|a| a.get("latency_ms"))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0),
            allow_incomplete_onboarding: toml_value
                .get("routing")
                .and_then(|r| r.get("allow_incomplete_onboarding"))
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            storage_path: PathBuf::new(),
            logs_dir: PathBuf::new(),
            auth_latency_ms: 0,
            allow_incomplete_onboarding: false,
        }
    }

    /// Create AppConfig with system-default paths for production use
    /// 生产环境使用：创建具有系统默认路径的 AppConfig
    ///
    /// `data_dir` is computed by the caller (e.g. with the `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            storage_path: data_dir.join(DEFAULT_STORE_FILE),
            logs_dir: data_dir.join("logs"),
            auth_latency_ms: DEFAULT_AUTH_LATENCY_MS,
            allow_incomplete_onboarding: false,
        }
    }

    pub fn guard_policy(&self) -> GuardPolicy {
        GuardPolicy {
            require_onboarding: !self.allow_incomplete_onboarding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toml::Value;

    #[test]
    fn test_from_toml_reads_all_sections() {
        let toml_str = r#"
            [storage]
            path = "/tmp/coachpro/store.json"

            [logging]
            dir = "/tmp/coachpro/logs"

            [auth]
            latency_ms = 250

            [routing]
            allow_incomplete_onboarding = true
        "#;
        let toml_value: Value = toml::from_str(toml_str).unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config.storage_path, PathBuf::from("/tmp/coachpro/store.json"));
        assert_eq!(config.logs_dir, PathBuf::from("/tmp/coachpro/logs"));
        assert_eq!(config.auth_latency_ms, 250);
        assert!(config.allow_incomplete_onboarding);
        assert!(!config.guard_policy().require_onboarding);
    }

    #[test]
    fn test_from_toml_missing_values_are_empty() {
        let toml_value: Value = toml::from_str("[storage]\n").unwrap();

        let config = AppConfig::from_toml(&toml_value).unwrap();

        assert_eq!(config, AppConfig::empty());
        assert!(config.guard_policy().require_onboarding);
    }

    #[test]
    fn test_negative_latency_is_clamped_to_zero() {
        let toml_value: Value = toml::from_str("[auth]\nlatency_ms = -5\n").unwrap();
        let config = AppConfig::from_toml(&toml_value).unwrap();
        assert_eq!(config.auth_latency_ms, 0);
    }

    #[test]
    fn test_with_system_defaults() {
        let config = AppConfig::with_system_defaults(PathBuf::from("/data/coachpro"));
        assert_eq!(
            config.storage_path,
            PathBuf::from("/data/coachpro").join(DEFAULT_STORE_FILE)
        );
        assert_eq!(config.auth_latency_ms, DEFAULT_AUTH_LATENCY_MS);
    }
}

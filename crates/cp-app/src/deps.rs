//! # Application Dependencies / 应用依赖
//!
//! Dependency grouping for [`crate::App`] construction.
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use cp_core::ports::{AuthGatewayPort, ClockPort, KeyValueStorePort};
use cp_core::routing::GuardPolicy;

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
pub struct AppDeps {
    // Storage dependencies / 存储依赖
    pub store: Arc<dyn KeyValueStorePort>,

    // Authentication boundary / 认证边界
    pub auth_gateway: Arc<dyn AuthGatewayPort>,

    // System dependencies / 系统依赖
    pub clock: Arc<dyn ClockPort>,

    // Navigation policy / 导航策略
    pub guard_policy: GuardPolicy,
}

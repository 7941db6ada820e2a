//! # 本地化子系统
//!
//! 存储、缓存与回退解析三层结构：
//!
//! - `store` - 持久化的 (语言, 消息键) → 消息表，保证键唯一
//! - `cache` - 进程级TTL缓存，写入时失效
//! - `resolver` - 回退链解析（请求语言 → 基础语言 → 默认语言 → 消息键）
//! - `service` - 服务门面，显式生命周期
//! - `config` / `error` / `types` - 配置、错误与类型定义

pub mod cache;
pub mod config;
pub mod error;
pub mod resolver;
pub mod service;
pub mod store;
pub mod types;

/// 初始化日志订阅器
///
/// 级别来自 `LOCALE_HUB_LOG_LEVEL`，默认 `info`；重复调用安全
pub fn init_logging() {
    use crate::env::{core, EnvVar};

    let level = core::LogLevel::get().unwrap_or_else(|_| "info".to_string());
    let level: tracing::Level = level.parse().unwrap_or(tracing::Level::INFO);

    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}

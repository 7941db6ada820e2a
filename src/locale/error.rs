//! 本地化模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制

use std::fmt;

use thiserror::Error;

/// 本地化错误类型
#[derive(Error, Debug, Clone)]
pub enum LocaleError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 输入验证错误
    #[error("输入无效: {0}")]
    ValidationError(String),

    /// 唯一约束冲突错误
    #[error("唯一约束冲突: {0}")]
    ConflictError(String),

    /// 超时错误
    #[error("操作超时: {0}")]
    TimeoutError(String),

    /// 存储后端错误
    #[error("存储后端错误: {0}")]
    StoreError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl LocaleError {
    /// 检查错误是否可重试
    pub fn is_retryable(&self) -> bool {
        match self {
            LocaleError::ConfigError(_) => false,
            LocaleError::ValidationError(_) => false,
            LocaleError::ConflictError(_) => true, // 后写者重试后获胜
            LocaleError::TimeoutError(_) => true,
            LocaleError::StoreError(_) => true,
            LocaleError::SerializationError(_) => false,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LocaleError::ConfigError(_) => ErrorSeverity::Critical,
            LocaleError::ValidationError(_) => ErrorSeverity::Info,
            LocaleError::ConflictError(_) => ErrorSeverity::Warning,
            LocaleError::TimeoutError(_) => ErrorSeverity::Warning,
            LocaleError::StoreError(_) => ErrorSeverity::Error,
            LocaleError::SerializationError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            LocaleError::ConfigError(_) => ErrorCategory::Configuration,
            LocaleError::ValidationError(_) => ErrorCategory::Input,
            LocaleError::ConflictError(_) => ErrorCategory::Conflict,
            LocaleError::TimeoutError(_) => ErrorCategory::Timeout,
            LocaleError::StoreError(_) => ErrorCategory::Storage,
            LocaleError::SerializationError(_) => ErrorCategory::Serialization,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Conflict,
    Timeout,
    Storage,
    Serialization,
}

/// 标准错误转换
impl From<serde_json::Error> for LocaleError {
    fn from(error: serde_json::Error) -> Self {
        LocaleError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

impl From<toml::de::Error> for LocaleError {
    fn from(error: toml::de::Error) -> Self {
        LocaleError::ConfigError(format!("TOML解析错误: {}", error))
    }
}

impl From<tokio::time::error::Elapsed> for LocaleError {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        LocaleError::TimeoutError(format!("异步操作超时: {}", error))
    }
}

#[cfg(feature = "mongo")]
impl From<mongodb::error::Error> for LocaleError {
    fn from(error: mongodb::error::Error) -> Self {
        if is_duplicate_key_error(&error) {
            return LocaleError::ConflictError(error.to_string());
        }

        // 根据错误消息内容判断错误类型
        let msg = error.to_string();
        if msg.contains("timed out") || msg.contains("timeout") {
            LocaleError::TimeoutError(msg)
        } else {
            LocaleError::StoreError(msg)
        }
    }
}

/// 判断是否为唯一索引冲突（E11000）
#[cfg(feature = "mongo")]
pub fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

/// 错误结果类型别名
pub type LocaleResult<T> = Result<T, LocaleError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 记录并返回错误
    pub fn log_error<T>(error: LocaleError) -> LocaleResult<T> {
        match error.severity() {
            ErrorSeverity::Info => tracing::info!("本地化信息: {}", error),
            ErrorSeverity::Warning => tracing::warn!("本地化警告: {}", error),
            ErrorSeverity::Error => tracing::error!("本地化错误: {}", error),
            ErrorSeverity::Critical => tracing::error!("本地化严重错误: {}", error),
        }

        Err(error)
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> LocaleError {
        LocaleError::ConfigError(msg.to_string())
    }

    /// 创建输入验证错误
    pub fn validation_error<T: fmt::Display>(msg: T) -> LocaleError {
        LocaleError::ValidationError(msg.to_string())
    }

    /// 创建冲突错误
    pub fn conflict_error<T: fmt::Display>(msg: T) -> LocaleError {
        LocaleError::ConflictError(msg.to_string())
    }

    /// 创建超时错误
    pub fn timeout_error<T: fmt::Display>(msg: T) -> LocaleError {
        LocaleError::TimeoutError(msg.to_string())
    }

    /// 创建存储错误
    pub fn store_error<T: fmt::Display>(msg: T) -> LocaleError {
        LocaleError::StoreError(msg.to_string())
    }
}

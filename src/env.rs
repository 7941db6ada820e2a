//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量管理

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Environment variable '{}': {}",
            self.variable, self.message
        )
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "LOCALE_HUB_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }
}

/// 语言相关环境变量
pub mod locale {
    use super::*;

    /// 默认语言
    pub struct DefaultLang;
    impl EnvVar<String> for DefaultLang {
        const NAME: &'static str = "LOCALE_HUB_DEFAULT_LANG";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Default language used as the last fallback level";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim().to_string();
            if lang.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language tag must not be empty".to_string(),
                });
            }
            if lang.chars().count() > 8 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Language tag must be at most 8 characters".to_string(),
                });
            }
            Ok(lang)
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存启用状态
    pub struct Enabled;
    impl EnvVar<bool> for Enabled {
        const NAME: &'static str = "LOCALE_HUB_CACHE_ENABLED";
        const DEFAULT: Option<bool> = None;
        const DESCRIPTION: &'static str = "Enable the in-memory message cache";

        fn parse(value: &str) -> EnvResult<bool> {
            parse_bool(value, Self::NAME)
        }
    }

    /// 缓存条目TTL
    pub struct Ttl;
    impl EnvVar<Duration> for Ttl {
        const NAME: &'static str = "LOCALE_HUB_CACHE_TTL";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Cache entry time-to-live in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_duration_secs(value, Self::NAME, 1, 86400)
        }
    }

    /// 过期清理周期
    pub struct CleanupInterval;
    impl EnvVar<Duration> for CleanupInterval {
        const NAME: &'static str = "LOCALE_HUB_CACHE_CLEANUP_INTERVAL";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Periodic expired-entry sweep interval in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_duration_secs(value, Self::NAME, 1, 86400)
        }
    }
}

/// 存储相关环境变量
pub mod store {
    use super::*;

    /// 存储连接地址
    pub struct Url;
    impl EnvVar<String> for Url {
        const NAME: &'static str = "LOCALE_HUB_STORE_URL";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Store connection URL (mongodb://...)";

        fn parse(value: &str) -> EnvResult<String> {
            let url = value.trim();
            if url.starts_with("mongodb://") || url.starts_with("mongodb+srv://") {
                Ok(url.to_string())
            } else {
                Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Store URL must start with mongodb:// or mongodb+srv://".to_string(),
                })
            }
        }
    }

    /// 数据库名
    pub struct Database;
    impl EnvVar<String> for Database {
        const NAME: &'static str = "LOCALE_HUB_STORE_DATABASE";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "Database name holding the locales collection";

        fn parse(value: &str) -> EnvResult<String> {
            let name = value.trim();
            if name.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Database name must not be empty".to_string(),
                });
            }
            Ok(name.to_string())
        }
    }

    /// 连接池大小
    pub struct MaxPoolSize;
    impl EnvVar<u32> for MaxPoolSize {
        const NAME: &'static str = "LOCALE_HUB_STORE_MAX_POOL_SIZE";
        const DEFAULT: Option<u32> = None;
        const DESCRIPTION: &'static str = "Maximum store connection pool size";

        fn parse(value: &str) -> EnvResult<u32> {
            let size: u32 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number".to_string(),
            })?;

            if size == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Pool size must be greater than 0".to_string(),
                });
            }

            if size > 500 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Pool size too large (max 500)".to_string(),
                });
            }

            Ok(size)
        }
    }

    /// 存储操作超时
    pub struct OpTimeout;
    impl EnvVar<Duration> for OpTimeout {
        const NAME: &'static str = "LOCALE_HUB_STORE_OP_TIMEOUT";
        const DEFAULT: Option<Duration> = None;
        const DESCRIPTION: &'static str = "Store operation timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            parse_duration_secs(value, Self::NAME, 1, 300)
        }
    }
}

/// 解析布尔环境变量
fn parse_bool(value: &str, name: &str) -> EnvResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(EnvError {
            variable: name.to_string(),
            message: format!("Invalid boolean '{}'. Use: true/false, 1/0, yes/no", value),
        }),
    }
}

/// 解析以秒为单位的时长环境变量
fn parse_duration_secs(value: &str, name: &str, min: u64, max: u64) -> EnvResult<Duration> {
    let seconds: u64 = value.parse().map_err(|_| EnvError {
        variable: name.to_string(),
        message: "Must be a valid number of seconds".to_string(),
    })?;

    if seconds < min {
        return Err(EnvError {
            variable: name.to_string(),
            message: format!("Value too small (min {} seconds)", min),
        });
    }

    if seconds > max {
        return Err(EnvError {
            variable: name.to_string(),
            message: format!("Value too large (max {} seconds)", max),
        });
    }

    Ok(Duration::from_secs(seconds))
}

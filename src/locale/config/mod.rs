//! 本地化配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, LocaleConfig, StoreConfig};

/// 配置常量
pub mod constants {
    use std::time::Duration;

    // 数据模型限制
    pub const MAX_LANG_LEN: usize = 8;
    pub const MAX_CODE_LEN: usize = 255;

    // 默认语言设置
    pub const DEFAULT_LANG: &str = "en";

    // 缓存设置
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600); // 1小时
    pub const DEFAULT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300); // 5分钟

    // 默认存储设置
    pub const DEFAULT_STORE_URL: &str = "mongodb://127.0.0.1:27017";
    pub const DEFAULT_DATABASE: &str = "locale_hub";
    pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
    pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
    pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(10);

    // 存储集合名
    pub const COLLECTION_NAME: &str = "locales";

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "locale-config.toml",
        "config.toml",
        ".locale-config.toml",
        "~/.config/locale-hub/config.toml",
        "/etc/locale-hub/config.toml",
    ];
}

/// 便利函数
pub fn config_file_exists() -> bool {
    constants::CONFIG_PATHS
        .iter()
        .any(|path| std::path::Path::new(path).exists())
}

/// 向后兼容的配置加载函数
pub fn load_locale_config(default_lang: &str) -> LocaleConfig {
    match ConfigManager::new() {
        Ok(manager) => {
            let mut config = manager.get_config().clone();
            if !default_lang.is_empty() {
                config.default_lang = default_lang.to_string();
            }
            config
        }
        Err(e) => {
            tracing::warn!("创建配置管理器失败，使用默认配置: {}", e);
            LocaleConfig::default_with_lang(default_lang)
        }
    }
}

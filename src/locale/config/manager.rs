//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::locale::error::{LocaleError, LocaleResult};

/// 本地化服务配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocaleConfig {
    // 语言配置
    pub default_lang: String,
    pub languages: Vec<String>,

    // 缓存配置
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
    pub cleanup_interval_secs: u64,

    // 存储配置
    pub store: StoreConfig,
}

/// 存储后端配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    pub url: String,
    pub database: String,
    pub max_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub op_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_STORE_URL.to_string(),
            database: constants::DEFAULT_DATABASE.to_string(),
            max_pool_size: constants::DEFAULT_MAX_POOL_SIZE,
            connect_timeout_secs: constants::DEFAULT_CONNECT_TIMEOUT.as_secs(),
            op_timeout_secs: constants::DEFAULT_OP_TIMEOUT.as_secs(),
        }
    }
}

impl StoreConfig {
    /// 转换为Duration类型
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn op_timeout(&self) -> Duration {
        Duration::from_secs(self.op_timeout_secs)
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default_lang: constants::DEFAULT_LANG.to_string(),
            languages: vec![constants::DEFAULT_LANG.to_string()],
            cache_enabled: true,
            cache_ttl_secs: constants::DEFAULT_CACHE_TTL.as_secs(),
            cleanup_interval_secs: constants::DEFAULT_CLEANUP_INTERVAL.as_secs(),
            store: StoreConfig::default(),
        }
    }
}

impl LocaleConfig {
    /// 创建带指定默认语言的配置
    pub fn default_with_lang(default_lang: &str) -> Self {
        let mut config = Self::default();
        if !default_lang.is_empty() {
            config.default_lang = default_lang.to_string();
            if !config.languages.contains(&config.default_lang) {
                config.languages.push(config.default_lang.clone());
            }
        }
        config
    }

    /// 验证配置
    pub fn validate(&self) -> LocaleResult<()> {
        if self.default_lang.trim().is_empty() {
            return Err(LocaleError::ConfigError(
                "默认语言不能为空".to_string(),
            ));
        }

        if self.default_lang.chars().count() > constants::MAX_LANG_LEN {
            return Err(LocaleError::ConfigError(format!(
                "默认语言 '{}' 超过最大长度 {}",
                self.default_lang,
                constants::MAX_LANG_LEN
            )));
        }

        if self.cache_enabled && self.cache_ttl_secs == 0 {
            return Err(LocaleError::ConfigError(
                "启用缓存时TTL不能为0".to_string(),
            ));
        }

        if self.store.max_pool_size == 0 {
            return Err(LocaleError::ConfigError(
                "连接池大小不能为0".to_string(),
            ));
        }

        if self.store.op_timeout_secs == 0 {
            return Err(LocaleError::ConfigError(
                "存储操作超时不能为0".to_string(),
            ));
        }

        Ok(())
    }

    /// 应用环境变量覆盖（使用类型安全环境变量系统）
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{cache, locale, store, EnvVar};

        // 语言相关环境变量
        if let Ok(default_lang) = locale::DefaultLang::get() {
            self.default_lang = default_lang;
        }

        // 缓存相关环境变量
        if let Ok(cache_enabled) = cache::Enabled::get() {
            self.cache_enabled = cache_enabled;
        }

        if let Ok(cache_ttl) = cache::Ttl::get() {
            self.cache_ttl_secs = cache_ttl.as_secs();
        }

        if let Ok(cleanup_interval) = cache::CleanupInterval::get() {
            self.cleanup_interval_secs = cleanup_interval.as_secs();
        }

        // 存储相关环境变量
        if let Ok(url) = store::Url::get() {
            tracing::info!("环境变量覆盖存储地址");
            self.store.url = url;
        }

        if let Ok(database) = store::Database::get() {
            self.store.database = database;
        }

        if let Ok(max_pool_size) = store::MaxPoolSize::get() {
            self.store.max_pool_size = max_pool_size;
        }

        if let Ok(op_timeout) = store::OpTimeout::get() {
            self.store.op_timeout_secs = op_timeout.as_secs();
        }
    }

    /// 转换为Duration类型
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: LocaleConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器
    pub fn new() -> LocaleResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &LocaleConfig {
        &self.config
    }

    /// 从文件加载配置
    fn load_config() -> LocaleResult<LocaleConfig> {
        // 首先尝试加载 .env 文件
        Self::load_dotenv();

        // 查找配置文件
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(LocaleConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> LocaleResult<LocaleConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LocaleError::ConfigError(format!("读取配置文件失败: {}", e)))?;

        // 尝试TOML格式
        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| LocaleError::ConfigError(format!("解析TOML配置失败: {}", e)))
        } else {
            // 尝试JSON格式
            serde_json::from_str(&content)
                .map_err(|e| LocaleError::ConfigError(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env.development", ".env.production", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() {
                if dotenv::from_filename(env_file).is_ok() {
                    tracing::info!("已加载环境变量文件: {}", env_file);
                    break;
                }
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> LocaleResult<()> {
        let config = LocaleConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| LocaleError::ConfigError(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| LocaleError::ConfigError(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}

// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

// 各集成测试二进制只使用部分辅助工具
#![allow(dead_code)]

use locale_hub::{LocaleConfig, LocaleService, LocaleStore};

/// 初始化测试日志（重复调用安全）
pub fn init() {
    locale_hub::locale::init_logging();
}

/// 测试配置构建器
pub struct TestConfigBuilder {
    config: LocaleConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: LocaleConfig::default(),
        }
    }

    /// 设置默认语言
    pub fn with_default_lang(mut self, lang: &str) -> Self {
        self.config.default_lang = lang.to_string();
        self
    }

    /// 禁用缓存
    pub fn without_cache(mut self) -> Self {
        self.config.cache_enabled = false;
        self
    }

    /// 禁用后台清理任务
    pub fn without_sweeper(mut self) -> Self {
        self.config.cleanup_interval_secs = 0;
        self
    }

    /// 设置缓存TTL（秒）
    pub fn with_cache_ttl_secs(mut self, secs: u64) -> Self {
        self.config.cache_ttl_secs = secs;
        self
    }

    /// 设置后台清理周期（秒）
    pub fn with_cleanup_interval_secs(mut self, secs: u64) -> Self {
        self.config.cleanup_interval_secs = secs;
        self
    }

    pub fn build(self) -> LocaleConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 测试数据生成器
pub struct TestDataGenerator;

impl TestDataGenerator {
    /// 生成某语言的 (消息键, 消息) 样本
    pub fn sample_messages(lang: &str, count: usize) -> Vec<(String, String)> {
        (0..count)
            .map(|i| {
                (
                    format!("label.{:03}", i),
                    format!("{} message {}", lang, i),
                )
            })
            .collect()
    }

    /// 向服务写入样本数据
    pub async fn seed_service<S: LocaleStore>(
        service: &LocaleService<S>,
        lang: &str,
        count: usize,
    ) {
        for (code, message) in Self::sample_messages(lang, count) {
            service
                .put(lang, &code, &message)
                .await
                .expect("seeding should succeed");
        }
    }
}

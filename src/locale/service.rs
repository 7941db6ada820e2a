//! 本地化服务层
//!
//! 组装存储、缓存与解析器，提供显式的启动与停止生命周期，以及保持缓存
//! 一致的管理端写入操作

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::TryStreamExt;
use tokio::task::JoinHandle;

use super::cache::{CacheStats, MessageCache};
use super::config::LocaleConfig;
use super::error::{LocaleError, LocaleResult};
use super::resolver::{Resolver, ResolverStats};
use super::store::{EntryStream, LocaleStore};
#[cfg(feature = "mongo")]
use super::store::MongoStore;
use super::types::{LocaleEntry, ResolveRequest, ResolveResponse};

/// 本地化服务
///
/// 进程级共享；缓存实例在启动时创建并显式传给解析器
pub struct LocaleService<S: LocaleStore> {
    store: Arc<S>,
    cache: MessageCache,
    resolver: Resolver<S>,
    config: LocaleConfig,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

#[cfg(feature = "mongo")]
impl LocaleService<MongoStore> {
    /// 连接MongoDB后端并启动服务
    ///
    /// 建立连接、创建索引、启动过期清理任务
    pub async fn connect(config: LocaleConfig) -> LocaleResult<Self> {
        config.validate()?;

        let store = MongoStore::connect(&config.store).await?;
        store.ensure_indexes().await?;

        Ok(Self::with_store(store, config))
    }
}

impl<S: LocaleStore> LocaleService<S> {
    /// 使用给定存储后端启动服务
    pub fn with_store(store: S, config: LocaleConfig) -> Self {
        let store = Arc::new(store);
        let cache = MessageCache::with_ttl(config.cache_ttl());
        let resolver = Resolver::new(
            Arc::clone(&store),
            cache.clone(),
            config.default_lang.clone(),
            config.cache_enabled,
            config.cache_ttl(),
        );

        let sweeper = if config.cache_enabled && config.cleanup_interval_secs > 0 {
            spawn_sweeper(cache.clone(), config.cleanup_interval())
        } else {
            None
        };

        tracing::info!(
            "本地化服务已启动，默认语言: {}，缓存: {}",
            config.default_lang,
            if config.cache_enabled { "启用" } else { "禁用" }
        );

        Self {
            store,
            cache,
            resolver,
            config,
            sweeper: Mutex::new(sweeper),
        }
    }

    /// 解析消息（前端边界调用）
    ///
    /// 永不失败；最坏情况返回消息键本身
    pub async fn resolve(&self, lang: &str, code: &str) -> String {
        self.resolver.resolve(lang, code).await
    }

    /// 以请求/响应DTO形式解析消息
    pub async fn resolve_request(&self, request: &ResolveRequest) -> ResolveResponse {
        ResolveResponse {
            message: self.resolve(&request.lang, &request.code).await,
        }
    }

    /// 写入本地化条目（管理端）
    ///
    /// 写入后同步失效缓存
    pub async fn put(&self, lang: &str, code: &str, message: &str) -> LocaleResult<LocaleEntry> {
        let entry = self.store.put(lang, code, message).await?;
        self.cache.invalidate(lang, code);
        tracing::info!("写入本地化条目 {}:{}", lang, code);
        Ok(entry)
    }

    /// 删除本地化条目（管理端）
    ///
    /// 不存在时为无操作；缓存与删除同步失效
    pub async fn delete(&self, lang: &str, code: &str) -> LocaleResult<bool> {
        let removed = self.store.delete(lang, code).await?;
        self.cache.invalidate(lang, code);
        if removed {
            tracing::info!("删除本地化条目 {}:{}", lang, code);
        }
        Ok(removed)
    }

    /// 精确读取条目（管理端，不经过缓存）
    pub async fn get(&self, lang: &str, code: &str) -> LocaleResult<Option<LocaleEntry>> {
        self.store.get(lang, code).await
    }

    /// 列出某语言的全部条目，按消息键排序
    pub async fn list_by_lang(&self, lang: &str) -> LocaleResult<EntryStream> {
        self.store.list_by_lang(lang).await
    }

    /// 获取某语言的完整消息目录
    ///
    /// 前端启动时一次性拉取整个语言的 code → message 映射
    pub async fn catalog(&self, lang: &str) -> LocaleResult<BTreeMap<String, String>> {
        let stream = self.store.list_by_lang(lang).await?;
        let entries: Vec<LocaleEntry> = stream.try_collect().await?;
        Ok(entries
            .into_iter()
            .map(|entry| (entry.code, entry.message))
            .collect())
    }

    /// 从TOML文件批量导入某语言的翻译
    ///
    /// 嵌套表展平为点分消息键；导入完成后整语言失效缓存
    pub async fn import_toml(&self, lang: &str, path: &Path) -> LocaleResult<usize> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LocaleError::ConfigError(format!("读取语言文件失败: {}", e)))?;
        let value: toml::Value = content.parse().map_err(LocaleError::from)?;

        let mut pairs = Vec::new();
        flatten_toml("", &value, &mut pairs);

        let mut imported = 0;
        for (code, message) in &pairs {
            self.store.put(lang, code, message).await?;
            imported += 1;
        }

        self.cache.invalidate_lang(lang);
        tracing::info!("已导入 {} 条 {} 翻译: {}", imported, lang, path.display());

        Ok(imported)
    }

    /// 获取缓存统计信息
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.get_stats()
    }

    /// 获取解析统计信息
    pub fn resolver_stats(&self) -> ResolverStats {
        self.resolver.get_stats()
    }

    /// 缓存实例
    pub fn cache(&self) -> &MessageCache {
        &self.cache
    }

    /// 服务配置
    pub fn config(&self) -> &LocaleConfig {
        &self.config
    }

    /// 停止服务
    ///
    /// 终止清理任务并清空缓存（显式teardown）
    pub fn shutdown(&self) {
        if let Some(handle) = self.sweeper.lock().unwrap().take() {
            handle.abort();
        }
        self.cache.clear();
        tracing::info!("本地化服务已停止");
    }
}

/// 启动周期性的过期缓存清理任务
fn spawn_sweeper(cache: MessageCache, interval: Duration) -> Option<JoinHandle<()>> {
    // 无运行时环境（纯同步构造）下跳过后台任务
    let handle = tokio::runtime::Handle::try_current().ok()?;

    Some(handle.spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // interval 的第一个tick立即完成
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.cleanup_expired();
            if removed > 0 {
                tracing::debug!("清理过期缓存条目: {}", removed);
            }
        }
    }))
}

/// 将嵌套TOML表展平为点分消息键
fn flatten_toml(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let code = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_toml(&code, child, out);
            }
        }
        toml::Value::String(text) => out.push((prefix.to_string(), text.clone())),
        toml::Value::Integer(_)
        | toml::Value::Float(_)
        | toml::Value::Boolean(_)
        | toml::Value::Datetime(_) => out.push((prefix.to_string(), value.to_string())),
        toml::Value::Array(_) => {
            tracing::warn!("跳过数组值的消息键: {}", prefix);
        }
    }
}

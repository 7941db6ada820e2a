//! 消息解析模块
//!
//! 按显式回退链解析 (语言, 消息键)：请求语言 → 基础语言 → 默认语言 →
//! 消息键本身。缺失翻译是软事件，解析永不向调用方抛出硬错误。

use std::sync::{Arc, RwLock};
use std::time::Duration;

use super::cache::MessageCache;
use super::store::LocaleStore;

// ============================================================================
// 回退链
// ============================================================================

/// 回退级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackLevel {
    /// 精确匹配请求语言
    Requested,
    /// 去掉末级子标签后的基础语言
    BaseLang,
    /// 配置的默认语言
    DefaultLang,
}

/// 去掉语言标签的末级子标签
///
/// 单级剥离：`en-US` → `en`，`zh-Hans-CN` → `zh-Hans`；无子标签返回 `None`
pub fn base_lang(tag: &str) -> Option<String> {
    let cut = tag.rfind(['-', '_'])?;
    if cut == 0 {
        return None;
    }
    Some(tag[..cut].to_string())
}

/// 构造有序回退链
///
/// 每级是 (语言, 消息键) 到可选消息的纯探测；重复语言只探测一次
pub fn fallback_chain(requested: &str, default_lang: &str) -> Vec<(FallbackLevel, String)> {
    let mut chain: Vec<(FallbackLevel, String)> = Vec::with_capacity(3);
    chain.push((FallbackLevel::Requested, requested.to_string()));

    if let Some(base) = base_lang(requested) {
        if !chain.iter().any(|(_, lang)| lang == &base) {
            chain.push((FallbackLevel::BaseLang, base));
        }
    }

    if !default_lang.is_empty() && !chain.iter().any(|(_, lang)| lang == default_lang) {
        chain.push((FallbackLevel::DefaultLang, default_lang.to_string()));
    }

    chain
}

// ============================================================================
// 解析器
// ============================================================================

/// 解析统计信息
#[derive(Debug, Default, Clone)]
pub struct ResolverStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub requested_hits: u64,
    pub base_lang_hits: u64,
    pub default_lang_hits: u64,
    pub missing: u64,
    pub store_errors: u64,
}

impl ResolverStats {
    /// 记录某回退级别的命中
    fn record_hit(&mut self, level: FallbackLevel) {
        match level {
            FallbackLevel::Requested => self.requested_hits += 1,
            FallbackLevel::BaseLang => self.base_lang_hits += 1,
            FallbackLevel::DefaultLang => self.default_lang_hits += 1,
        }
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 消息解析器
///
/// 缓存实例由构造方显式传入，不使用隐式单例
#[derive(Clone)]
pub struct Resolver<S: LocaleStore> {
    store: Arc<S>,
    cache: MessageCache,
    default_lang: String,
    cache_enabled: bool,
    cache_ttl: Duration,
    stats: Arc<RwLock<ResolverStats>>,
}

impl<S: LocaleStore> Resolver<S> {
    /// 创建新的解析器
    pub fn new(
        store: Arc<S>,
        cache: MessageCache,
        default_lang: String,
        cache_enabled: bool,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            store,
            cache,
            default_lang,
            cache_enabled,
            cache_ttl,
            stats: Arc::new(RwLock::new(ResolverStats::default())),
        }
    }

    /// 解析消息
    ///
    /// 固定存储状态下是 (请求语言, 消息键) 的纯函数，结果在下次写入前稳定。
    /// 任一回退级命中都以*原始请求键*填充缓存；完全回退（返回消息键本身）
    /// 不写入缓存，管理端的后续写入立即可见。
    pub async fn resolve(&self, lang: &str, code: &str) -> String {
        {
            let mut stats = self.stats.write().unwrap();
            stats.total_requests += 1;
        }

        // 仅以原始请求键查询缓存
        if self.cache_enabled {
            if let Some(message) = self.cache.lookup(lang, code) {
                let mut stats = self.stats.write().unwrap();
                stats.cache_hits += 1;
                return message;
            }
        }

        for (level, probe_lang) in fallback_chain(lang, &self.default_lang) {
            match self.store.get(&probe_lang, code).await {
                Ok(Some(entry)) => {
                    {
                        let mut stats = self.stats.write().unwrap();
                        stats.record_hit(level);
                    }
                    if self.cache_enabled {
                        self.cache
                            .store(lang, code, &entry.message, &probe_lang, Some(self.cache_ttl));
                    }
                    return entry.message;
                }
                Ok(None) => continue,
                Err(e) => {
                    // 存储故障降级到下一回退级，终端用户不见原始错误
                    let mut stats = self.stats.write().unwrap();
                    stats.store_errors += 1;
                    drop(stats);
                    tracing::warn!("解析 {}:{} 时存储查询失败: {}", probe_lang, code, e);
                }
            }
        }

        // 完全回退：返回消息键本身作为可见标记，并记录缺失翻译事件
        {
            let mut stats = self.stats.write().unwrap();
            stats.missing += 1;
        }
        tracing::warn!("缺失翻译: lang={} code={}", lang, code);
        code.to_string()
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> ResolverStats {
        self.stats.read().unwrap().clone()
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        self.stats.write().unwrap().reset();
    }

    /// 配置的默认语言
    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }
}

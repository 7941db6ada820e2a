//! 消息缓存模块
//!
//! 提供 (语言, 消息键) 到已解析消息的进程级缓存，基于TTL过期，写入时失效。

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use super::config::constants::DEFAULT_CACHE_TTL;

// ============================================================================
// 核心类型
// ============================================================================

/// 缓存键：请求语言 + 消息键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub lang: String,
    pub code: String,
}

impl CacheKey {
    pub fn new(lang: String, code: String) -> Self {
        Self { lang, code }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lang, self.code)
    }
}

/// 缓存槽
///
/// `source_lang` 记录实际提供消息的回退级语言，删除该语言条目时据此同步清除
#[derive(Debug, Clone)]
pub struct CacheSlot {
    pub message: String,
    pub source_lang: String,
    pub stored_at: Instant,
    pub expires_at: Instant,
}

impl CacheSlot {
    pub fn new(message: String, source_lang: String, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            message,
            source_lang,
            stored_at: now,
            expires_at: now + ttl,
        }
    }

    /// 检查槽是否过期
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone)]
pub struct CacheStats {
    pub total_requests: u64,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub total_entries: usize,
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_requests as f64
        }
    }

    /// 计算缓存未命中率
    pub fn miss_rate(&self) -> f64 {
        1.0 - self.hit_rate()
    }

    /// 重置统计信息
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// 消息缓存
///
/// 仅按TTL过期；数据集由管理端输入决定，规模小且有界，不需要LRU/容量上限
#[derive(Clone)]
pub struct MessageCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheSlot>>>,
    default_ttl: Duration,
    stats: Arc<RwLock<CacheStats>>,
}

// ============================================================================
// 实现
// ============================================================================

impl MessageCache {
    /// 创建新的消息缓存
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// 使用指定默认TTL创建缓存
    pub fn with_ttl(default_ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            default_ttl,
            stats: Arc::new(RwLock::new(CacheStats::default())),
        }
    }

    /// 查询缓存条目
    ///
    /// 未命中返回 `None`（不是错误）；过期槽在访问时惰性清除
    pub fn lookup(&self, lang: &str, code: &str) -> Option<String> {
        let key = CacheKey::new(lang.to_string(), code.to_string());

        // 锁顺序固定为 entries → stats
        let mut entries = self.entries.write().unwrap();
        let mut result = None;
        let mut evicted = false;
        if let Some(slot) = entries.get(&key) {
            if !slot.is_expired() {
                result = Some(slot.message.clone());
            } else {
                evicted = true;
            }
        }
        if evicted {
            // 惰性清除过期槽
            entries.remove(&key);
        }

        let mut stats = self.stats.write().unwrap();
        stats.total_requests += 1;
        if evicted {
            stats.evictions += 1;
        }
        if result.is_some() {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }

        result
    }

    /// 插入或覆盖缓存条目
    pub fn store(
        &self,
        lang: &str,
        code: &str,
        message: &str,
        source_lang: &str,
        ttl: Option<Duration>,
    ) {
        let key = CacheKey::new(lang.to_string(), code.to_string());
        let slot = CacheSlot::new(
            message.to_string(),
            source_lang.to_string(),
            ttl.unwrap_or(self.default_ttl),
        );

        let mut entries = self.entries.write().unwrap();
        entries.insert(key, slot);

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
    }

    /// 失效指定 (语言, 消息键) 的缓存
    ///
    /// 同时清除同一消息键下由该语言回退填充的槽，保证删除后的读取一致性
    pub fn invalidate(&self, lang: &str, code: &str) -> usize {
        let mut entries = self.entries.write().unwrap();
        let initial_size = entries.len();

        entries.retain(|key, slot| {
            let exact = key.lang == lang && key.code == code;
            let fallback_hit = key.code == code && slot.source_lang == lang;
            !(exact || fallback_hit)
        });

        let removed = initial_size - entries.len();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
        stats.invalidations += removed as u64;

        removed
    }

    /// 失效某语言的全部缓存，用于批量重载翻译
    pub fn invalidate_lang(&self, lang: &str) -> usize {
        let mut entries = self.entries.write().unwrap();
        let initial_size = entries.len();

        entries.retain(|key, slot| key.lang != lang && slot.source_lang != lang);

        let removed = initial_size - entries.len();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
        stats.invalidations += removed as u64;

        removed
    }

    /// 清空缓存
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap();
        entries.clear();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = 0;
    }

    /// 清理过期条目，返回清除数量
    pub fn cleanup_expired(&self) -> usize {
        let mut entries = self.entries.write().unwrap();
        let initial_size = entries.len();

        entries.retain(|_, slot| !slot.is_expired());

        let removed = initial_size - entries.len();

        let mut stats = self.stats.write().unwrap();
        stats.total_entries = entries.len();
        stats.evictions += removed as u64;

        removed
    }

    /// 获取统计信息
    pub fn get_stats(&self) -> CacheStats {
        let total_entries = self.entries.read().unwrap().len();

        let mut result = self.stats.read().unwrap().clone();
        result.total_entries = total_entries;
        result
    }

    /// 重置统计信息
    pub fn reset_stats(&self) {
        let mut stats = self.stats.write().unwrap();
        stats.reset();
    }

    /// 获取缓存大小
    pub fn size(&self) -> usize {
        let entries = self.entries.read().unwrap();
        entries.len()
    }
}

impl Default for MessageCache {
    fn default() -> Self {
        Self::new()
    }
}

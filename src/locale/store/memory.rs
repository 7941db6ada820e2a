//! 内存存储后端
//!
//! 用于开发与测试；读写计数器可作为缓存一致性测试的观测探针

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use futures::stream;
use futures::StreamExt;

use super::{EntryStream, LocaleStore};
use crate::locale::error::LocaleResult;
use crate::locale::types::{validate_put, LocaleEntry};

/// 存储操作统计
#[derive(Debug, Default, Clone)]
pub struct StoreStats {
    pub puts: u64,
    pub gets: u64,
    pub lists: u64,
    pub deletes: u64,
}

/// 内存存储
///
/// 键为 (语言, 消息键)；BTreeMap迭代天然按消息键有序
#[derive(Clone)]
pub struct MemoryStore {
    entries: Arc<RwLock<BTreeMap<(String, String), LocaleEntry>>>,
    stats: Arc<RwLock<StoreStats>>,
    next_id: Arc<AtomicU64>,
}

impl MemoryStore {
    /// 创建空的内存存储
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(BTreeMap::new())),
            stats: Arc::new(RwLock::new(StoreStats::default())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// 获取操作统计
    pub fn get_stats(&self) -> StoreStats {
        self.stats.read().unwrap().clone()
    }

    /// 读取操作计数（缓存一致性测试的探针）
    pub fn get_count(&self) -> u64 {
        self.stats.read().unwrap().gets
    }

    /// 全部条目数量
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        format!("mem-{:06}", n)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocaleStore for MemoryStore {
    async fn put(&self, lang: &str, code: &str, message: &str) -> LocaleResult<LocaleEntry> {
        validate_put(lang, code, message)?;

        let mut stats = self.stats.write().unwrap();
        stats.puts += 1;
        drop(stats);

        let now = Utc::now();
        let key = (lang.to_string(), code.to_string());
        let mut entries = self.entries.write().unwrap();

        let entry = match entries.get(&key) {
            // 已存在则仅替换消息文本并刷新更新时间
            Some(existing) => LocaleEntry {
                id: existing.id.clone(),
                lang: existing.lang.clone(),
                code: existing.code.clone(),
                message: message.to_string(),
                created_at: existing.created_at,
                updated_at: now,
            },
            None => LocaleEntry {
                id: self.allocate_id(),
                lang: lang.to_string(),
                code: code.to_string(),
                message: message.to_string(),
                created_at: now,
                updated_at: now,
            },
        };

        entries.insert(key, entry.clone());
        Ok(entry)
    }

    async fn get(&self, lang: &str, code: &str) -> LocaleResult<Option<LocaleEntry>> {
        let mut stats = self.stats.write().unwrap();
        stats.gets += 1;
        drop(stats);

        let entries = self.entries.read().unwrap();
        Ok(entries
            .get(&(lang.to_string(), code.to_string()))
            .cloned())
    }

    async fn list_by_lang(&self, lang: &str) -> LocaleResult<EntryStream> {
        let mut stats = self.stats.write().unwrap();
        stats.lists += 1;
        drop(stats);

        // 快照后惰性产出；(语言, 消息键) 复合键保证按消息键有序
        let snapshot: Vec<LocaleEntry> = {
            let entries = self.entries.read().unwrap();
            entries
                .range((lang.to_string(), String::new())..)
                .take_while(|((entry_lang, _), _)| entry_lang.as_str() == lang)
                .map(|(_, entry)| entry.clone())
                .collect()
        };

        Ok(stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }

    async fn delete(&self, lang: &str, code: &str) -> LocaleResult<bool> {
        let mut stats = self.stats.write().unwrap();
        stats.deletes += 1;
        drop(stats);

        let mut entries = self.entries.write().unwrap();
        Ok(entries
            .remove(&(lang.to_string(), code.to_string()))
            .is_some())
    }

    async fn count(&self, lang: &str) -> LocaleResult<u64> {
        let entries = self.entries.read().unwrap();
        let count = entries
            .range((lang.to_string(), String::new())..)
            .take_while(|((entry_lang, _), _)| entry_lang.as_str() == lang)
            .count();
        Ok(count as u64)
    }
}

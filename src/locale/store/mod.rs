//! 本地化条目存储后端
//!
//! 定义存储契约并提供两种实现：
//! - `memory` - 内存后端（开发与测试）
//! - `mongo` - MongoDB后端（生产，可选feature）

pub mod memory;
#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::{MemoryStore, StoreStats};
#[cfg(feature = "mongo")]
pub use mongo::MongoStore;

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::error::LocaleResult;
use super::types::LocaleEntry;

/// 惰性、有限、可重启的条目序列，按消息键排序
///
/// 每次调用 `list_by_lang` 都产生一个全新的游标
pub type EntryStream = BoxStream<'static, LocaleResult<LocaleEntry>>;

/// 存储契约
///
/// 存储I/O是唯一的挂起点；(`code`, `lang`) 的唯一约束由后端保证
#[async_trait]
pub trait LocaleStore: Send + Sync {
    /// 插入或更新 (`code`, `lang`) 对应的条目
    ///
    /// 参数校验失败返回 `ValidationError`；并发插入竞争唯一约束且重试
    /// 仍失败时返回 `ConflictError`（后写者重试后获胜）
    async fn put(&self, lang: &str, code: &str, message: &str) -> LocaleResult<LocaleEntry>;

    /// 精确查询；`None` 为内部未命中信号，不是错误
    async fn get(&self, lang: &str, code: &str) -> LocaleResult<Option<LocaleEntry>>;

    /// 列出某语言的全部条目，按消息键排序
    async fn list_by_lang(&self, lang: &str) -> LocaleResult<EntryStream>;

    /// 删除条目；不存在时为无操作，返回 `false`
    async fn delete(&self, lang: &str, code: &str) -> LocaleResult<bool>;

    /// 统计某语言的条目数量
    async fn count(&self, lang: &str) -> LocaleResult<u64>;
}

//! # Locale Hub
//!
//! 本地化消息的存储、查询与回退解析服务库。仪表盘与论坛前端渲染的每个
//! 标签都依赖本服务按 (消息键, 语言) 解析出展示文本。
//!
//! ## 模块组织
//!
//! - `locale` - 本地化子系统（存储、缓存、解析器、服务门面）
//! - `env` - 类型安全的环境变量管理

pub mod env;
pub mod locale;

// Re-export commonly used items for convenience
pub use locale::cache::{CacheStats, MessageCache};
pub use locale::config::{ConfigManager, LocaleConfig, StoreConfig};
pub use locale::error::{LocaleError, LocaleResult};
pub use locale::resolver::{base_lang, fallback_chain, FallbackLevel, Resolver, ResolverStats};
pub use locale::service::LocaleService;
pub use locale::store::{EntryStream, LocaleStore, MemoryStore, StoreStats};
#[cfg(feature = "mongo")]
pub use locale::store::MongoStore;
pub use locale::types::{LocaleEntry, ResolveRequest, ResolveResponse};

//! MongoDB存储后端
//!
//! `locales` 集合持久化本地化条目，(code, lang) 唯一复合索引保证键唯一

use std::future::IntoFuture;
use std::time::Duration;

use async_trait::async_trait;
use bson::{doc, oid::ObjectId, DateTime};
use futures::StreamExt;
use mongodb::options::{ClientOptions, IndexOptions, ReturnDocument};
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};

use super::{EntryStream, LocaleStore};
use crate::locale::config::constants::COLLECTION_NAME;
use crate::locale::config::StoreConfig;
use crate::locale::error::{LocaleError, LocaleResult};
use crate::locale::types::{validate_put, LocaleEntry};

/// MongoDB中存储的本地化条目文档
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocaleDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 语言标签
    pub lang: String,
    /// 消息键
    pub code: String,
    /// 消息文本
    pub message: String,
    /// 创建时间
    pub created_at: DateTime,
    /// 更新时间
    pub updated_at: DateTime,
}

impl From<LocaleDocument> for LocaleEntry {
    fn from(doc: LocaleDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            lang: doc.lang,
            code: doc.code,
            message: doc.message,
            created_at: doc.created_at.to_chrono(),
            updated_at: doc.updated_at.to_chrono(),
        }
    }
}

/// MongoDB存储
///
/// 连接池有界，池耗尽时调用方排队等待；所有操作带总体超时，超时转换为
/// `TimeoutError`（背压而非拒绝）
pub struct MongoStore {
    collection: Collection<LocaleDocument>,
    op_timeout: Duration,
}

impl MongoStore {
    /// 连接存储后端
    pub async fn connect(cfg: &StoreConfig) -> LocaleResult<Self> {
        let mut options = ClientOptions::parse(&cfg.url)
            .await
            .map_err(LocaleError::from)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = Some(cfg.max_pool_size);
        options.connect_timeout = Some(cfg.connect_timeout());
        options.server_selection_timeout = Some(cfg.connect_timeout());

        let client = Client::with_options(options).map_err(LocaleError::from)?;
        let collection = client
            .database(&cfg.database)
            .collection::<LocaleDocument>(COLLECTION_NAME);

        tracing::info!("已连接存储后端，数据库: {}", cfg.database);

        Ok(Self {
            collection,
            op_timeout: cfg.op_timeout(),
        })
    }

    /// 创建数据库索引
    ///
    /// (code, lang) 唯一复合索引，code、lang 各自的单字段索引
    pub async fn ensure_indexes(&self) -> LocaleResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "code": 1, "lang": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("code_lang_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "code": 1 })
                .options(IndexOptions::builder().name("code_1".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "lang": 1 })
                .options(IndexOptions::builder().name("lang_1".to_string()).build())
                .build(),
        ];

        self.with_timeout(self.collection.create_indexes(indexes))
            .await?;

        Ok(())
    }

    /// 为存储操作施加总体超时
    async fn with_timeout<T, F>(&self, op: F) -> LocaleResult<T>
    where
        F: IntoFuture<Output = Result<T, mongodb::error::Error>>,
    {
        tokio::time::timeout(self.op_timeout, op.into_future())
            .await
            .map_err(LocaleError::from)?
            .map_err(LocaleError::from)
    }
}

#[async_trait]
impl LocaleStore for MongoStore {
    async fn put(&self, lang: &str, code: &str, message: &str) -> LocaleResult<LocaleEntry> {
        validate_put(lang, code, message)?;

        let filter = doc! { "code": code, "lang": lang };
        let now = DateTime::now();
        let update = doc! {
            "$set": { "message": message, "updated_at": now },
            "$setOnInsert": { "lang": lang, "code": code, "created_at": now },
        };

        let mut retried = false;
        loop {
            let result = self
                .with_timeout(
                    self.collection
                        .find_one_and_update(filter.clone(), update.clone())
                        .upsert(true)
                        .return_document(ReturnDocument::After),
                )
                .await;

            match result {
                Ok(Some(doc)) => return Ok(doc.into()),
                Ok(None) => {
                    return Err(LocaleError::StoreError(
                        "写入后未返回文档".to_string(),
                    ))
                }
                // 并发插入竞争唯一索引：重试一次，后写者获胜
                Err(LocaleError::ConflictError(msg)) if !retried => {
                    retried = true;
                    tracing::debug!("唯一索引竞争，重试写入 {}:{}: {}", lang, code, msg);
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get(&self, lang: &str, code: &str) -> LocaleResult<Option<LocaleEntry>> {
        let filter = doc! { "code": code, "lang": lang };
        let doc = self
            .with_timeout(self.collection.find_one(filter))
            .await?;
        Ok(doc.map(LocaleEntry::from))
    }

    async fn list_by_lang(&self, lang: &str) -> LocaleResult<EntryStream> {
        let cursor = self
            .with_timeout(
                self.collection
                    .find(doc! { "lang": lang })
                    .sort(doc! { "code": 1 }),
            )
            .await?;

        let stream = cursor
            .map(|result| result.map(LocaleEntry::from).map_err(LocaleError::from))
            .boxed();

        Ok(stream)
    }

    async fn delete(&self, lang: &str, code: &str) -> LocaleResult<bool> {
        let filter = doc! { "code": code, "lang": lang };
        let result = self
            .with_timeout(self.collection.delete_one(filter))
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, lang: &str) -> LocaleResult<u64> {
        let count = self
            .with_timeout(self.collection.count_documents(doc! { "lang": lang }))
            .await?;
        Ok(count)
    }
}

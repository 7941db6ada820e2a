//! 存储契约集成测试
//!
//! 针对内存后端验证存储的写入、唯一性、校验与列表语义

use futures::TryStreamExt;

use locale_hub::{LocaleEntry, LocaleError, LocaleStore, MemoryStore};

mod common;

/// 测试写入后读取返回存储的消息
#[tokio::test]
async fn test_put_then_get_roundtrip() {
    common::init();
    let store = MemoryStore::new();

    let entry = store
        .put("zh", "nav.home", "首页")
        .await
        .expect("put should succeed");

    assert_eq!(entry.lang, "zh");
    assert_eq!(entry.code, "nav.home");
    assert_eq!(entry.message, "首页");
    assert!(!entry.id.is_empty());

    let fetched = store
        .get("zh", "nav.home")
        .await
        .expect("get should not error")
        .expect("entry should be found");
    assert_eq!(fetched.message, "首页");

    // 其他键不受影响
    let missing = store.get("zh", "nav.about").await.unwrap();
    assert!(missing.is_none());

    println!("✅ Put/get roundtrip test passed");
}

/// 测试 (lang, code) 唯一性：重复写入只保留最新消息
#[tokio::test]
async fn test_put_uniqueness_latest_wins() {
    let store = MemoryStore::new();

    let first = store.put("en", "greeting", "Hello").await.unwrap();
    let second = store.put("en", "greeting", "Hi there").await.unwrap();

    // 同一条目，ID与创建时间不变，更新时间刷新
    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    assert_eq!(second.message, "Hi there");

    assert_eq!(store.count("en").await.unwrap(), 1);

    let fetched = store.get("en", "greeting").await.unwrap().unwrap();
    assert_eq!(fetched.message, "Hi there");

    println!("✅ Uniqueness test passed - latest message wins");
}

/// 测试写入参数校验
#[tokio::test]
async fn test_put_validation_errors() {
    let store = MemoryStore::new();

    let cases = vec![
        ("", "code", "message"),            // 空语言
        ("   ", "code", "message"),         // 空白语言
        ("language!", "code", "message"),   // 语言超过8字符
        ("en", "", "message"),              // 空消息键
        ("en", "code", ""),                 // 空消息
    ];

    for (lang, code, message) in cases {
        let result = store.put(lang, code, message).await;
        assert!(
            matches!(result, Err(LocaleError::ValidationError(_))),
            "expected validation error for ({:?}, {:?}, {:?}), got {:?}",
            lang,
            code,
            message,
            result
        );
    }

    // 消息键超过255字符
    let long_code = "x".repeat(256);
    let result = store.put("en", &long_code, "message").await;
    assert!(matches!(result, Err(LocaleError::ValidationError(_))));

    // 边界值合法
    assert!(store.put("zh-Hant", &"y".repeat(255), "ok").await.is_ok());

    println!("✅ Validation test passed");
}

/// 测试删除：存在时删除，不存在时无操作
#[tokio::test]
async fn test_delete_is_noop_when_absent() {
    let store = MemoryStore::new();

    store.put("en", "farewell", "Goodbye").await.unwrap();

    assert!(store.delete("en", "farewell").await.unwrap());
    assert!(store.get("en", "farewell").await.unwrap().is_none());

    // 再次删除不是错误
    assert!(!store.delete("en", "farewell").await.unwrap());
    assert!(!store.delete("xx", "never.existed").await.unwrap());

    println!("✅ Delete no-op test passed");
}

/// 测试按语言列表：按消息键排序、语言隔离、可重启
#[tokio::test]
async fn test_list_by_lang_ordered_and_restartable() {
    let store = MemoryStore::new();

    // 乱序写入
    store.put("en", "nav.home", "Home").await.unwrap();
    store.put("en", "footer.contact", "Contact").await.unwrap();
    store.put("en", "nav.about", "About").await.unwrap();
    store.put("fr", "nav.home", "Accueil").await.unwrap();

    let entries: Vec<LocaleEntry> = store
        .list_by_lang("en")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    let codes: Vec<&str> = entries.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["footer.contact", "nav.about", "nav.home"]);
    assert!(entries.iter().all(|e| e.lang == "en"));

    // 序列可重启：再次调用产生全新的游标，结果一致
    let second: Vec<LocaleEntry> = store
        .list_by_lang("en")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(entries, second);

    // 未知语言为空序列
    let empty: Vec<LocaleEntry> = store
        .list_by_lang("xx")
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert!(empty.is_empty());

    println!("✅ List by lang test passed - {} entries ordered by code", codes.len());
}

/// 测试语言计数
#[tokio::test]
async fn test_count_per_lang() {
    let store = MemoryStore::new();

    for (code, message) in common::TestDataGenerator::sample_messages("zh", 5) {
        store.put("zh", &code, &message).await.unwrap();
    }
    store.put("en", "only.one", "One").await.unwrap();

    assert_eq!(store.count("zh").await.unwrap(), 5);
    assert_eq!(store.count("en").await.unwrap(), 1);
    assert_eq!(store.count("xx").await.unwrap(), 0);

    println!("✅ Count test passed");
}

/// 测试并发写入同一键的最终一致性
#[tokio::test]
async fn test_concurrent_puts_same_key() {
    let store = MemoryStore::new();

    let mut handles = vec![];
    for i in 0..10 {
        let s = store.clone();
        handles.push(tokio::spawn(async move {
            s.put("en", "shared.key", &format!("value {}", i)).await
        }));
    }

    for handle in handles {
        handle.await.expect("task should complete").unwrap();
    }

    // 唯一约束下只保留一个条目
    assert_eq!(store.count("en").await.unwrap(), 1);
    let entry = store.get("en", "shared.key").await.unwrap().unwrap();
    assert!(entry.message.starts_with("value "));

    println!("✅ Concurrent put test passed - single entry survives");
}

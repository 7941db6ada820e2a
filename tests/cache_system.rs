//! 缓存系统集成测试
//!
//! 测试TTL过期、失效语义与并发访问

use std::sync::Arc;
use std::time::Duration;

use locale_hub::MessageCache;

mod common;

/// 测试基本缓存操作
#[tokio::test]
async fn test_basic_cache_operations() {
    common::init();
    let cache = MessageCache::new();

    // 初始状态应该为空
    assert!(cache.lookup("zh", "nav.home").is_none());

    // 存储和检索
    cache.store("zh", "nav.home", "首页", "zh", None);
    assert_eq!(cache.lookup("zh", "nav.home"), Some("首页".to_string()));

    // 覆盖写入
    cache.store("zh", "nav.home", "主页", "zh", None);
    assert_eq!(cache.lookup("zh", "nav.home"), Some("主页".to_string()));

    assert_eq!(cache.size(), 1);

    println!("✅ Basic cache operations test passed");
}

/// 测试缓存统计和命中率
#[tokio::test]
async fn test_cache_statistics_monitoring() {
    let cache = MessageCache::new();

    let initial = cache.get_stats();
    assert_eq!(initial.hits, 0);
    assert_eq!(initial.misses, 0);

    for i in 0..10 {
        let code = format!("label.{:03}", i);
        // 首次访问应该是miss
        assert!(cache.lookup("en", &code).is_none());
        cache.store("en", &code, &format!("Message {}", i), "en", None);
        // 再次访问应该是hit
        assert!(cache.lookup("en", &code).is_some());
    }

    let stats = cache.get_stats();
    assert_eq!(stats.misses, 10);
    assert_eq!(stats.hits, 10);
    assert_eq!(stats.total_requests, 20);
    assert!(stats.hit_rate() > 0.0);
    assert_eq!(stats.total_entries, 10);

    cache.reset_stats();
    let reset = cache.get_stats();
    assert_eq!(reset.hits, 0);
    assert_eq!(reset.misses, 0);

    println!("✅ Cache statistics monitoring test passed");
}

/// 测试缓存过期机制
#[tokio::test]
async fn test_cache_expiration_mechanism() {
    let cache = MessageCache::with_ttl(Duration::from_secs(300));

    // 带短TTL的条目
    cache.store(
        "en",
        "ephemeral",
        "Soon gone",
        "en",
        Some(Duration::from_millis(50)),
    );
    // 默认TTL的条目
    cache.store("en", "durable", "Still here", "en", None);

    // 立即访问应该成功
    assert!(cache.lookup("en", "ephemeral").is_some());

    // 等待过期
    tokio::time::sleep(Duration::from_millis(100)).await;

    // 过期条目在访问时惰性清除
    assert!(cache.lookup("en", "ephemeral").is_none());
    assert!(cache.lookup("en", "durable").is_some());

    // 清理过期条目
    cache.store(
        "en",
        "ephemeral2",
        "Also soon gone",
        "en",
        Some(Duration::from_millis(10)),
    );
    tokio::time::sleep(Duration::from_millis(30)).await;
    let cleaned = cache.cleanup_expired();
    assert_eq!(cleaned, 1);
    assert_eq!(cache.size(), 1);

    println!("✅ Cache expiration mechanism test passed");
}

/// 测试精确失效与回退槽失效
#[tokio::test]
async fn test_cache_invalidation_semantics() {
    let cache = MessageCache::new();

    // en-US 槽由 en 回退填充；fr 槽独立
    cache.store("en-US", "greeting", "Hello", "en", None);
    cache.store("en", "greeting", "Hello", "en", None);
    cache.store("fr", "greeting", "Bonjour", "fr", None);
    cache.store("en", "farewell", "Goodbye", "en", None);

    // 失效 (en, greeting) 必须同时清除回退填充的 en-US 槽
    let removed = cache.invalidate("en", "greeting");
    assert_eq!(removed, 2);
    assert!(cache.lookup("en", "greeting").is_none());
    assert!(cache.lookup("en-US", "greeting").is_none());

    // 无关键不受影响
    assert!(cache.lookup("fr", "greeting").is_some());
    assert!(cache.lookup("en", "farewell").is_some());

    println!("✅ Cache invalidation semantics test passed");
}

/// 测试整语言失效（批量重载场景）
#[tokio::test]
async fn test_invalidate_whole_language() {
    let cache = MessageCache::new();

    for i in 0..5 {
        cache.store("zh", &format!("label.{}", i), &format!("标签{}", i), "zh", None);
    }
    cache.store("zh-TW", "label.0", "標籤0", "zh", None);
    cache.store("en", "label.0", "Label 0", "en", None);

    let removed = cache.invalidate_lang("zh");
    // zh 的5个槽加上由 zh 回退填充的 zh-TW 槽
    assert_eq!(removed, 6);
    assert_eq!(cache.size(), 1);
    assert!(cache.lookup("en", "label.0").is_some());

    println!("✅ Invalidate language test passed - removed {} slots", removed);
}

/// 测试高并发缓存访问
#[tokio::test]
async fn test_high_concurrency_cache_access() {
    let cache = Arc::new(MessageCache::new());

    let num_concurrent_tasks = 50;
    let operations_per_task = 10;

    let mut handles = vec![];

    for task_id in 0..num_concurrent_tasks {
        let c = Arc::clone(&cache);

        let handle = tokio::spawn(async move {
            for op_id in 0..operations_per_task {
                let code = format!("concurrent.{}.{}", task_id, op_id);
                c.store("en", &code, &format!("Item {} {}", task_id, op_id), "en", None);
                assert!(c.lookup("en", &code).is_some());
            }
            operations_per_task
        });

        handles.push(handle);
    }

    let mut total_operations = 0;
    for handle in handles {
        total_operations += handle.await.expect("concurrent task should complete");
    }

    assert_eq!(total_operations, num_concurrent_tasks * operations_per_task);
    assert_eq!(cache.size(), total_operations);

    println!(
        "✅ High concurrency test passed - {} operations",
        total_operations
    );
}

/// 测试并发写同一键的最终一致性
#[tokio::test]
async fn test_concurrent_store_same_key() {
    let cache = MessageCache::new();

    let mut handles = vec![];
    for i in 0..10 {
        let c = cache.clone();
        handles.push(tokio::spawn(async move {
            c.store("en", "shared.key", &format!("translation {}", i), "en", None);
            c.lookup("en", "shared.key").is_some()
        }));
    }

    let mut success_count = 0;
    for handle in handles {
        if handle.await.expect("task should complete") {
            success_count += 1;
        }
    }

    // 值是幂等读取，后写者获胜即可
    assert_eq!(success_count, 10);
    assert!(cache.lookup("en", "shared.key").is_some());
    assert_eq!(cache.size(), 1);

    println!("✅ Concurrent same-key store test passed");
}

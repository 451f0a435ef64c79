//! 计数服务测试
//!
//! ViewTracker 的端到端判定：校验 → 限流 → 去重 → 发布检查 → 计数。

use std::sync::Arc;
use std::sync::Once;

use chrono::Utc;
use tempfile::TempDir;
use trustpage::config::init_config;
use trustpage::errors::TrustPageError;
use trustpage::services::{CountOutcome, ViewTracker};
use trustpage::storage::{Account, Page, PlanTier, SeaOrmStorage};
use uuid::Uuid;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("tracking_test.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

/// 建一个账户 + 已发布页面，返回页面 ID
async fn seed_page(storage: &Arc<SeaOrmStorage>, published: bool) -> String {
    let account = Account {
        id: Uuid::new_v4().to_string(),
        plan_tier: PlanTier::Free,
        created_at: Utc::now(),
    };
    storage.create_account(&account).await.unwrap();

    let page = Page {
        id: Uuid::new_v4().to_string(),
        account_id: account.id,
        published,
        view_count: 0,
        created_at: Utc::now(),
    };
    storage.create_page(&page).await.unwrap();
    page.id
}

async fn view_count(storage: &Arc<SeaOrmStorage>, page_id: &str) -> i64 {
    storage.get_page(page_id).await.unwrap().unwrap().view_count
}

#[tokio::test]
async fn test_fresh_view_is_counted() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, true).await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    let outcome = tracker.count_view(&page_id, "203.0.113.7").await.unwrap();
    assert_eq!(outcome, CountOutcome::Counted);
    assert_eq!(view_count(&storage, &page_id).await, 1);
}

#[tokio::test]
async fn test_duplicate_within_window_not_counted() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, true).await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    let first = tracker.count_view(&page_id, "203.0.113.7").await.unwrap();
    assert_eq!(first, CountOutcome::Counted);

    // 窗口内重复：成功但不计数，计数保持不变
    let second = tracker.count_view(&page_id, "203.0.113.7").await.unwrap();
    assert_eq!(second, CountOutcome::Duplicate);
    assert_eq!(view_count(&storage, &page_id).await, 1);
}

#[tokio::test]
async fn test_distinct_visitors_count_separately() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, true).await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    tracker.count_view(&page_id, "203.0.113.7").await.unwrap();
    tracker.count_view(&page_id, "203.0.113.8").await.unwrap();

    assert_eq!(view_count(&storage, &page_id).await, 2);
}

#[tokio::test]
async fn test_rate_limit_ceiling() {
    let (storage, _dir) = create_temp_storage().await;
    let tracker = ViewTracker::with_limits(storage.clone(), 3, 60);

    // 同一访客跨页面累计：3 次之后第 4 次被限流
    for _ in 0..3 {
        let page_id = seed_page(&storage, true).await;
        let outcome = tracker.count_view(&page_id, "203.0.113.7").await.unwrap();
        assert_eq!(outcome, CountOutcome::Counted);
    }

    let blocked_page = seed_page(&storage, true).await;
    let result = tracker.count_view(&blocked_page, "203.0.113.7").await;
    assert!(matches!(result, Err(TrustPageError::RateLimitExceeded(_))));
    assert_eq!(view_count(&storage, &blocked_page).await, 0);

    // 其他访客不受影响
    let outcome = tracker
        .count_view(&blocked_page, "203.0.113.8")
        .await
        .unwrap();
    assert_eq!(outcome, CountOutcome::Counted);
}

#[tokio::test]
async fn test_only_counted_views_feed_rate_limit() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, true).await;
    let tracker = ViewTracker::with_limits(storage.clone(), 2, 60);

    assert_eq!(
        tracker.count_view(&page_id, "203.0.113.7").await.unwrap(),
        CountOutcome::Counted
    );
    // 去重命中不落追踪记录，不消耗限流额度
    assert_eq!(
        tracker.count_view(&page_id, "203.0.113.7").await.unwrap(),
        CountOutcome::Duplicate
    );
    assert_eq!(
        tracker.count_view(&page_id, "203.0.113.7").await.unwrap(),
        CountOutcome::Duplicate
    );

    // 额度只用掉一次，换个页面还能计数
    let other_page = seed_page(&storage, true).await;
    assert_eq!(
        tracker.count_view(&other_page, "203.0.113.7").await.unwrap(),
        CountOutcome::Counted
    );
}

#[tokio::test]
async fn test_expired_dedupe_window_counts_again() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, true).await;
    // 窗口为 0：上一次计数立即视为窗口外
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 0);

    assert_eq!(
        tracker.count_view(&page_id, "203.0.113.7").await.unwrap(),
        CountOutcome::Counted
    );
    assert_eq!(
        tracker.count_view(&page_id, "203.0.113.7").await.unwrap(),
        CountOutcome::Counted
    );
    assert_eq!(view_count(&storage, &page_id).await, 2);
}

#[tokio::test]
async fn test_unpublished_page_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let page_id = seed_page(&storage, false).await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    let result = tracker.count_view(&page_id, "203.0.113.7").await;
    assert!(matches!(result, Err(TrustPageError::NotFound(_))));
    assert_eq!(view_count(&storage, &page_id).await, 0);
}

#[tokio::test]
async fn test_missing_page_rejected() {
    let (storage, _dir) = create_temp_storage().await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    let result = tracker
        .count_view(&Uuid::new_v4().to_string(), "203.0.113.7")
        .await;
    assert!(matches!(result, Err(TrustPageError::NotFound(_))));
}

#[tokio::test]
async fn test_malformed_page_id_rejected_before_db() {
    let (storage, _dir) = create_temp_storage().await;
    let tracker = ViewTracker::with_limits(storage.clone(), 20, 60);

    for bad_id in ["", "not-a-uuid", "1; DROP TABLE pages--"] {
        let result = tracker.count_view(bad_id, "203.0.113.7").await;
        assert!(
            matches!(result, Err(TrustPageError::Validation(_))),
            "expected validation error for {:?}",
            bad_id
        );
    }
}

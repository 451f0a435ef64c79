//! 访问记录器
//!
//! 每 (页面, 会话) 至多记录一次访问。会话守卫只在插入确认成功后
//! 才落键：失败的尝试允许同会话下次渲染时重试。任何失败都记日志
//! 后吞掉，访问记录永远不阻塞页面渲染。

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::session::SessionStore;
use crate::storage::models::VisitRecord;
use crate::storage::SeaOrmStorage;

/// 访问记录落库接口
#[async_trait]
pub trait VisitSink: Send + Sync {
    async fn record(&self, record: &VisitRecord) -> anyhow::Result<()>;
}

#[async_trait]
impl VisitSink for SeaOrmStorage {
    async fn record(&self, record: &VisitRecord) -> anyhow::Result<()> {
        self.insert_visit(record)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}

/// 会话守卫键前缀
const VISIT_GUARD_PREFIX: &str = "tp_visit_recorded:";

pub struct VisitRecorder {
    session: Arc<dyn SessionStore>,
    sink: Arc<dyn VisitSink>,
}

impl VisitRecorder {
    pub fn new(session: Arc<dyn SessionStore>, sink: Arc<dyn VisitSink>) -> Self {
        Self { session, sink }
    }

    /// 记录一次页面访问
    ///
    /// 返回 true 表示本次调用真正写入了记录；会话内重复调用和
    /// 失败的写入都返回 false。
    pub async fn record_page_view(&self, record: &VisitRecord) -> bool {
        let guard_key = format!("{}{}", VISIT_GUARD_PREFIX, record.page_id);

        // 会话内幂等
        if self.session.get(&guard_key).is_some() {
            debug!("Visit already recorded this session: {}", record.page_id);
            return false;
        }

        match self.sink.record(record).await {
            Ok(()) => {
                // 守卫只在确认成功后设置，失败允许下次重试
                self.session.set(&guard_key, "1");
                true
            }
            Err(e) => {
                warn!("Visit recording failed (non-blocking): {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::session::MemorySessionStore;
    use crate::utils::DeviceClass;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingSink {
        calls: AtomicU32,
        fail_first: AtomicU32,
    }

    impl CountingSink {
        fn new(fail_first: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail_first: AtomicU32::new(fail_first),
            }
        }
    }

    #[async_trait]
    impl VisitSink for CountingSink {
        async fn record(&self, _record: &VisitRecord) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                anyhow::bail!("insert rejected");
            }
            Ok(())
        }
    }

    fn record() -> VisitRecord {
        VisitRecord {
            page_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            referrer: None,
            source: Some("direct".to_string()),
            user_agent: None,
            device_class: DeviceClass::Desktop,
            visitor_hash: Some("abc123".to_string()),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_records_once_per_session() {
        let sink = Arc::new(CountingSink::new(0));
        let recorder = VisitRecorder::new(Arc::new(MemorySessionStore::new()), sink.clone());

        assert!(recorder.record_page_view(&record()).await);
        assert!(!recorder.record_page_view(&record()).await);
        assert!(!recorder.record_page_view(&record()).await);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_allows_retry() {
        let sink = Arc::new(CountingSink::new(1));
        let recorder = VisitRecorder::new(Arc::new(MemorySessionStore::new()), sink.clone());

        // 首次失败：守卫不落键
        assert!(!recorder.record_page_view(&record()).await);
        // 同会话重试成功
        assert!(recorder.record_page_view(&record()).await);
        // 之后幂等
        assert!(!recorder.record_page_view(&record()).await);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_separate_sessions_both_record() {
        // 指纹碰撞的两个浏览器各自有独立会话存储，都应各记一次
        let sink = Arc::new(CountingSink::new(0));
        let recorder_a = VisitRecorder::new(Arc::new(MemorySessionStore::new()), sink.clone());
        let recorder_b = VisitRecorder::new(Arc::new(MemorySessionStore::new()), sink.clone());

        assert!(recorder_a.record_page_view(&record()).await);
        assert!(recorder_b.record_page_view(&record()).await);
        assert_eq!(sink.calls.load(Ordering::SeqCst), 2);
    }
}

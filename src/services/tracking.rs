//! 浏览计数限流与计数服务
//!
//! 服务端判定一次 "count this view" 请求是否真正递增页面计数。
//! 判定顺序：
//! 1. 页面 ID 合法性（任何数据库访问之前）
//! 2. 访客身份哈希 = xxh64(ip + 当天 UTC 日期)，按天轮换
//! 3. 单访客小时滑动窗口限流（默认 20 次/小时）
//! 4. (页面, 访客) 去重窗口（默认 60 分钟，重复返回成功但不计数）
//! 5. 页面存在且已发布
//! 6. 事务内原子递增 + 落追踪记录
//!
//! 窗口预检查读库失败时记日志后放行：可用性优先于完美限流，
//! 不因瞬态读故障阻断正常流量。计数事务失败则是请求级失败。

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, warn};
use xxhash_rust::xxh64::xxh64;

use crate::config::get_config;
use crate::errors::{Result, TrustPageError};
use crate::storage::SeaOrmStorage;
use crate::utils::is_valid_page_id;

/// 计数判定结果（三态中的两个成功态；拒绝走 Err）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountOutcome {
    /// 计数已递增
    Counted,
    /// 去重窗口内的重复浏览，成功但未计数
    Duplicate,
}

/// 服务端访客身份哈希：xxh64(ip + UTC 日期)，16 位十六进制
///
/// 日期成分让哈希按天轮换，限制限流状态的有效生命周期，
/// 也避免跨天关联。此哈希绝不混入客户端指纹数据，防止
/// 通过伪造指纹绕过限流。
pub fn visitor_identity_hash(ip: &str, date: NaiveDate) -> String {
    let input = format!("{}{}", ip, date.format("%Y-%m-%d"));
    format!("{:016x}", xxh64(input.as_bytes(), 0))
}

/// 限流统计窗口：固定为一小时滑动窗口，与去重窗口互相独立
const RATE_LIMIT_WINDOW_MINUTES: i64 = 60;

/// 浏览计数服务
pub struct ViewTracker {
    storage: Arc<SeaOrmStorage>,
    hourly_ip_ceiling: u64,
    dedupe_window_minutes: i64,
}

impl ViewTracker {
    /// 按全局配置创建
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        let config = get_config();
        Self::with_limits(
            storage,
            config.tracking.hourly_ip_ceiling,
            config.tracking.dedupe_window_minutes,
        )
    }

    /// 指定窗口参数创建（测试用）
    pub fn with_limits(
        storage: Arc<SeaOrmStorage>,
        hourly_ip_ceiling: u64,
        dedupe_window_minutes: i64,
    ) -> Self {
        Self {
            storage,
            hourly_ip_ceiling,
            dedupe_window_minutes,
        }
    }

    /// 处理一次计数请求
    pub async fn count_view(&self, page_id: &str, ip: &str) -> Result<CountOutcome> {
        // 1. 校验页面 ID，先于任何数据库访问
        if !is_valid_page_id(page_id) {
            return Err(TrustPageError::validation(format!(
                "页面 ID 格式非法: {}",
                page_id
            )));
        }

        // 2. 身份哈希按天轮换
        let visitor_hash = visitor_identity_hash(ip, Utc::now().date_naive());

        // 3. 单访客小时限流（读失败放行）
        match self
            .storage
            .count_recent_views(&visitor_hash, RATE_LIMIT_WINDOW_MINUTES)
            .await
        {
            Ok(count) if count >= self.hourly_ip_ceiling => {
                debug!(
                    "Rate limit hit: visitor {} has {} counted views in window",
                    visitor_hash, count
                );
                return Err(TrustPageError::rate_limit_exceeded(format!(
                    "访客 {} 超过每小时计数上限 ({})",
                    visitor_hash, self.hourly_ip_ceiling
                )));
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Rate limit pre-check failed, waving request through: {}", e);
            }
        }

        // 4. (页面, 访客) 去重窗口（读失败放行）
        match self
            .storage
            .has_recent_page_view(page_id, &visitor_hash, self.dedupe_window_minutes)
            .await
        {
            Ok(true) => {
                debug!(
                    "Duplicate view within window: page {} visitor {}",
                    page_id, visitor_hash
                );
                return Ok(CountOutcome::Duplicate);
            }
            Ok(false) => {}
            Err(e) => {
                warn!("Dedupe pre-check failed, waving request through: {}", e);
            }
        }

        // 5. 页面必须存在且已发布
        if self.storage.get_published_page(page_id).await?.is_none() {
            return Err(TrustPageError::not_found(format!(
                "页面不存在或未发布: {}",
                page_id
            )));
        }

        // 6. 原子递增 + 追踪记录（内部重检发布状态）
        self.storage
            .record_counted_view(page_id, &visitor_hash)
            .await?;

        Ok(CountOutcome::Counted)
    }
}

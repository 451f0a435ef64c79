//! 浏览计数追踪操作
//!
//! view_tracking 表承载两个时间窗口判定：
//! - 单访客哈希的小时滑动窗口 COUNT（全局限流）
//! - (页面, 访客哈希) 的去重窗口 EXISTS
//!
//! 计数本身是一个事务：pages.view_count 原子 +1 并同时落一条
//! view_tracking 记录。预检查只是避免无谓写入的过滤器，正确性
//! 由事务保证（并发下允许极少量多计，不允许计数损坏）。

use chrono::{DateTime, Duration, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, TransactionTrait};

use super::SeaOrmStorage;
use super::converters::tracking_active_model;
use super::retry;
use crate::errors::{Result, TrustPageError};
use migration::entities::{page, view_tracking};

impl SeaOrmStorage {
    /// 统计某访客哈希在滑动窗口内被计入的浏览次数
    ///
    /// 窗口按请求时刻回溯，不做固定分桶。
    pub async fn count_recent_views(
        &self,
        visitor_hash: &str,
        window_minutes: i64,
    ) -> Result<u64> {
        let cutoff = window_cutoff(window_minutes);
        let count = view_tracking::Entity::find()
            .filter(view_tracking::Column::VisitorHash.eq(visitor_hash))
            .filter(view_tracking::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await?;
        Ok(count)
    }

    /// 窗口内是否已为 (页面, 访客哈希) 计过数
    pub async fn has_recent_page_view(
        &self,
        page_id: &str,
        visitor_hash: &str,
        window_minutes: i64,
    ) -> Result<bool> {
        let cutoff = window_cutoff(window_minutes);
        let count = view_tracking::Entity::find()
            .filter(view_tracking::Column::PageId.eq(page_id))
            .filter(view_tracking::Column::VisitorHash.eq(visitor_hash))
            .filter(view_tracking::Column::CreatedAt.gte(cutoff))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// 原子计数：view_count +1 并落追踪记录，单个事务内完成
    ///
    /// 只对已发布页面生效；UPDATE 影响 0 行时回滚并报 NotFound，
    /// 覆盖"预检查通过后页面被下线/删除"的竞态。
    pub async fn record_counted_view(&self, page_id: &str, visitor_hash: &str) -> Result<()> {
        let db = &self.db;
        let now = Utc::now();

        retry::with_retry("record_counted_view", self.retry_config, || async move {
            let txn = db.begin().await?;

            let update = page::Entity::update_many()
                .col_expr(
                    page::Column::ViewCount,
                    Expr::col(page::Column::ViewCount).add(1),
                )
                .filter(page::Column::Id.eq(page_id))
                .filter(page::Column::Published.eq(true))
                .exec(&txn)
                .await?;

            if update.rows_affected == 0 {
                txn.rollback().await?;
                return Err(sea_orm::DbErr::RecordNotFound(page_id.to_string()));
            }

            view_tracking::Entity::insert(tracking_active_model(page_id, visitor_hash, now))
                .exec(&txn)
                .await?;

            txn.commit().await?;
            Ok(())
        })
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotFound(id) => {
                TrustPageError::not_found(format!("页面不存在或未发布: {}", id))
            }
            other => TrustPageError::database_operation(format!(
                "计数事务失败 (page: {}): {}",
                page_id, other
            )),
        })
    }
}

fn window_cutoff(window_minutes: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(window_minutes)
}

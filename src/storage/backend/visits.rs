//! 访问记录写入
//!
//! visits 表只追加。写入失败由上层（HTTP handler）记日志后吞掉，
//! 访问记录永远不阻塞页面渲染。

use sea_orm::EntityTrait;
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::visit_to_active_model;
use super::retry;
use crate::errors::{Result, TrustPageError};
use crate::storage::models::VisitRecord;
use migration::entities::visit;

impl SeaOrmStorage {
    pub async fn insert_visit(&self, record: &VisitRecord) -> Result<()> {
        let db = &self.db;
        retry::with_retry("insert_visit", self.retry_config, || async move {
            visit::Entity::insert(visit_to_active_model(record))
                .exec(db)
                .await
        })
        .await
        .map_err(|e| {
            TrustPageError::database_operation(format!(
                "写入访问记录失败 (page: {}): {}",
                record.page_id, e
            ))
        })?;

        debug!(
            "Visit recorded for page {} ({})",
            record.page_id, record.device_class
        );
        Ok(())
    }
}

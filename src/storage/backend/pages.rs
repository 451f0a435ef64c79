//! 页面读写操作
//!
//! 注意：view_count 不在这里修改，唯一的递增路径是
//! `tracking::record_counted_view` 的事务。

use sea_orm::{EntityTrait, PaginatorTrait};

use super::SeaOrmStorage;
use super::converters::{model_to_account, model_to_page, page_to_active_model};
use crate::errors::{Result, TrustPageError};
use crate::storage::models::{Account, Page};
use migration::entities::{account, page};

impl SeaOrmStorage {
    pub async fn create_page(&self, new_page: &Page) -> Result<()> {
        let model = page_to_active_model(new_page);
        page::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrustPageError::database_operation(format!(
                    "创建页面 '{}' 失败: {}",
                    new_page.id, e
                ))
            })?;
        Ok(())
    }

    pub async fn get_page(&self, page_id: &str) -> Result<Option<Page>> {
        let model = page::Entity::find_by_id(page_id).one(&self.db).await?;
        Ok(model.map(model_to_page))
    }

    /// 获取已发布页面；未发布视同不存在
    pub async fn get_published_page(&self, page_id: &str) -> Result<Option<Page>> {
        Ok(self
            .get_page(page_id)
            .await?
            .filter(|p| p.published))
    }

    /// 获取页面及其所有者账户（配额判定需要套餐档位）
    pub async fn get_page_with_owner(&self, page_id: &str) -> Result<Option<(Page, Account)>> {
        let Some(page) = self.get_page(page_id).await? else {
            return Ok(None);
        };

        let owner = account::Entity::find_by_id(&page.account_id)
            .one(&self.db)
            .await?
            .map(model_to_account)
            .ok_or_else(|| {
                TrustPageError::database_operation(format!(
                    "页面 '{}' 的所有者账户 '{}' 不存在",
                    page.id, page.account_id
                ))
            })?;

        Ok(Some((page, owner)))
    }

    /// 页面总数（健康检查用，不加载全表）
    pub async fn count_pages(&self) -> Result<u64> {
        Ok(page::Entity::find().count(&self.db).await?)
    }
}

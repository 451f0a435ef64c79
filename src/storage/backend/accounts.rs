//! 账户读写操作

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{account_to_active_model, model_to_account};
use super::retry;
use crate::errors::{Result, TrustPageError};
use crate::storage::models::{Account, PlanTier};
use migration::entities::account;

impl SeaOrmStorage {
    pub async fn create_account(&self, new_account: &Account) -> Result<()> {
        let model = account_to_active_model(new_account);
        account::Entity::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| {
                TrustPageError::database_operation(format!(
                    "创建账户 '{}' 失败: {}",
                    new_account.id, e
                ))
            })?;
        Ok(())
    }

    pub async fn get_account(&self, account_id: &str) -> Result<Option<Account>> {
        let model = account::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_account))
    }

    /// 变更账户套餐档位（支付 webhook 的唯一写入路径）
    pub async fn set_plan_tier(&self, account_id: &str, tier: PlanTier) -> Result<()> {
        let db = &self.db;
        let result = retry::with_retry("set_plan_tier", self.retry_config, || async move {
            account::Entity::update_many()
                .col_expr(
                    account::Column::PlanTier,
                    sea_orm::sea_query::Expr::value(tier.to_string()),
                )
                .filter(account::Column::Id.eq(account_id))
                .exec(db)
                .await
        })
        .await?;

        if result.rows_affected == 0 {
            return Err(TrustPageError::not_found(format!(
                "账户不存在: {}",
                account_id
            )));
        }

        info!("Account {} plan tier set to {}", account_id, tier);
        Ok(())
    }
}

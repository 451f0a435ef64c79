//! 支付 webhook 处理
//!
//! 保持支付网关的事件契约：事件名 + payment 对象（客户 ID、金额、
//! 外部引用串 `<accountId>_<planType>`）。通过的购买事件把所有者
//! 账户升到对应档位，退款/取消事件降回 free。网关内部逻辑不在
//! 本服务范围内，这里只消费回调。

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::{Result, TrustPageError};
use crate::storage::models::PlanTier;
use crate::storage::SeaOrmStorage;

/// 支付网关回调事件
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentWebhookEvent {
    pub event: String,
    pub payment: PaymentObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentObject {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
    /// `<accountId>_<planType>`，由结账流程写入
    pub external_reference: String,
}

/// 从外部引用串解析出的套餐变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanChange {
    pub account_id: String,
    pub tier: PlanTier,
}

/// 解析 `<accountId>_<planType>` 外部引用
///
/// 账户 ID 是 UUID（不含下划线），从右侧切一次即可。
pub fn parse_external_reference(reference: &str) -> Result<PlanChange> {
    let Some((account_id, plan)) = reference.rsplit_once('_') else {
        return Err(TrustPageError::upstream(format!(
            "外部引用格式非法（缺少 '_' 分隔符）: {}",
            reference
        )));
    };

    if account_id.is_empty() {
        return Err(TrustPageError::upstream(format!(
            "外部引用缺少账户 ID: {}",
            reference
        )));
    }

    let tier = PlanTier::from_str(plan).map_err(TrustPageError::upstream)?;

    Ok(PlanChange {
        account_id: account_id.to_string(),
        tier,
    })
}

/// 购买通过类事件
const APPROVED_EVENTS: [&str; 2] = ["PURCHASE_APPROVED", "SUBSCRIPTION_RENEWED"];

/// 退款/取消类事件（降回 free）
const REVOKED_EVENTS: [&str; 3] = [
    "PURCHASE_REFUNDED",
    "SUBSCRIPTION_CANCELED",
    "CHARGEBACK_REQUESTED",
];

pub struct BillingService {
    storage: Arc<SeaOrmStorage>,
}

impl BillingService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 应用一个支付事件到账户套餐
    pub async fn apply_event(&self, event: &PaymentWebhookEvent) -> Result<PlanChange> {
        let change = parse_external_reference(&event.payment.external_reference)?;

        if APPROVED_EVENTS.contains(&event.event.as_str()) {
            self.storage
                .set_plan_tier(&change.account_id, change.tier)
                .await?;
            info!(
                "Payment event {}: account {} -> {}",
                event.event, change.account_id, change.tier
            );
            Ok(change)
        } else if REVOKED_EVENTS.contains(&event.event.as_str()) {
            let downgraded = PlanChange {
                account_id: change.account_id.clone(),
                tier: PlanTier::Free,
            };
            self.storage
                .set_plan_tier(&downgraded.account_id, downgraded.tier)
                .await?;
            info!(
                "Payment event {}: account {} downgraded to free",
                event.event, downgraded.account_id
            );
            Ok(downgraded)
        } else {
            warn!("Unhandled payment event type: {}", event.event);
            Err(TrustPageError::upstream(format!(
                "未知的支付事件类型: {}",
                event.event
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_external_reference() {
        let change =
            parse_external_reference("550e8400-e29b-41d4-a716-446655440000_pro").unwrap();
        assert_eq!(change.account_id, "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(change.tier, PlanTier::Pro);
    }

    #[test]
    fn test_parse_external_reference_missing_separator() {
        assert!(parse_external_reference("no-separator").is_err());
    }

    #[test]
    fn test_parse_external_reference_unknown_plan() {
        assert!(parse_external_reference("acct_enterprise").is_err());
    }

    #[test]
    fn test_parse_external_reference_empty_account() {
        assert!(parse_external_reference("_pro").is_err());
    }
}

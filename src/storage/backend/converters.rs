//! 实体模型与领域模型之间的转换

use std::str::FromStr;

use sea_orm::ActiveValue::Set;
use tracing::warn;

use crate::storage::models::{Account, Page, PlanTier, VisitRecord};
use migration::entities::{account, page, view_tracking, visit};

pub fn model_to_page(model: page::Model) -> Page {
    Page {
        id: model.id,
        account_id: model.account_id,
        published: model.published,
        view_count: model.view_count,
        created_at: model.created_at,
    }
}

pub fn model_to_account(model: account::Model) -> Account {
    // 数据库中的未知档位字符串降级为 free，不让单行脏数据打挂读路径
    let plan_tier = PlanTier::from_str(&model.plan_tier).unwrap_or_else(|e| {
        warn!("Account {} has invalid plan tier: {}", model.id, e);
        PlanTier::default()
    });

    Account {
        id: model.id,
        plan_tier,
        created_at: model.created_at,
    }
}

pub fn page_to_active_model(p: &Page) -> page::ActiveModel {
    page::ActiveModel {
        id: Set(p.id.clone()),
        account_id: Set(p.account_id.clone()),
        published: Set(p.published),
        view_count: Set(p.view_count),
        created_at: Set(p.created_at),
    }
}

pub fn account_to_active_model(a: &Account) -> account::ActiveModel {
    account::ActiveModel {
        id: Set(a.id.clone()),
        plan_tier: Set(a.plan_tier.to_string()),
        created_at: Set(a.created_at),
    }
}

pub fn visit_to_active_model(v: &VisitRecord) -> visit::ActiveModel {
    visit::ActiveModel {
        page_id: Set(v.page_id.clone()),
        referrer: Set(v.referrer.clone()),
        source: Set(v.source.clone()),
        user_agent: Set(v.user_agent.clone()),
        device_class: Set(v.device_class.to_string()),
        visitor_hash: Set(v.visitor_hash.clone()),
        created_at: Set(v.created_at),
        ..Default::default()
    }
}

pub fn tracking_active_model(
    page_id: &str,
    visitor_hash: &str,
    at: chrono::DateTime<chrono::Utc>,
) -> view_tracking::ActiveModel {
    view_tracking::ActiveModel {
        page_id: Set(page_id.to_string()),
        visitor_hash: Set(visitor_hash.to_string()),
        created_at: Set(at),
        ..Default::default()
    }
}

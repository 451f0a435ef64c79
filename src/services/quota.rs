//! 配额判定
//!
//! 页面计数达到所有者套餐的月度上限后，渲染层必须用不可关闭的
//! 遮罩替换页面主体；已认证的所有者本人不受遮罩影响。
//! 计数的重置/滚动由外部定时任务负责，不在本服务范围内。

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::storage::models::{Page, PlanTier};

/// 套餐能力表
///
/// 所有按档位的判断统一走这张表，避免字符串比较散落各处。
#[derive(Debug, Clone, Copy)]
pub struct PlanCapabilities {
    /// 月度浏览上限；None 表示不限
    pub monthly_view_ceiling: Option<u64>,
    pub custom_domains: bool,
    pub ai_copy_generation: bool,
}

impl PlanTier {
    /// 档位 → 能力的唯一映射
    pub fn capabilities(&self) -> PlanCapabilities {
        match self {
            PlanTier::Free => PlanCapabilities {
                monthly_view_ceiling: Some(1000),
                custom_domains: false,
                ai_copy_generation: false,
            },
            PlanTier::Pro => PlanCapabilities {
                monthly_view_ceiling: None,
                custom_domains: true,
                ai_copy_generation: false,
            },
            PlanTier::Elite => PlanCapabilities {
                monthly_view_ceiling: None,
                custom_domains: true,
                ai_copy_generation: true,
            },
        }
    }
}

/// 渲染模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Normal,
    LimitReached,
}

/// 所有者判定协作接口（认证子系统提供实现）
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    /// viewer 为已认证的账户 ID，匿名访客为 None
    async fn is_owner(&self, page: &Page, viewer: Option<&str>) -> bool;
}

/// 按账户 ID 直接比对的默认实现
///
/// 认证会话 → 账户 ID 的解析在本服务之外完成，这里只做归属比对。
pub struct AccountIdResolver;

#[async_trait]
impl OwnerResolver for AccountIdResolver {
    async fn is_owner(&self, page: &Page, viewer: Option<&str>) -> bool {
        viewer.is_some_and(|id| id == page.account_id)
    }
}

/// 配额闸门
pub struct QuotaGate {
    resolver: Arc<dyn OwnerResolver>,
}

impl QuotaGate {
    pub fn new(resolver: Arc<dyn OwnerResolver>) -> Self {
        Self { resolver }
    }

    /// 计数是否已达套餐上限
    pub fn is_over_ceiling(view_count: i64, tier: PlanTier) -> bool {
        match tier.capabilities().monthly_view_ceiling {
            Some(ceiling) => view_count >= 0 && view_count as u64 >= ceiling,
            None => false,
        }
    }

    /// 判定页面渲染模式
    pub async fn render_mode(
        &self,
        page: &Page,
        owner_tier: PlanTier,
        viewer: Option<&str>,
    ) -> RenderMode {
        if !Self::is_over_ceiling(page.view_count, owner_tier) {
            return RenderMode::Normal;
        }

        // 超限页面对所有者本人保持可见
        if self.resolver.is_owner(page, viewer).await {
            return RenderMode::Normal;
        }

        RenderMode::LimitReached
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn page(view_count: i64) -> Page {
        Page {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            account_id: "owner-1".to_string(),
            published: true,
            view_count,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_free_ceiling_is_1000() {
        assert_eq!(
            PlanTier::Free.capabilities().monthly_view_ceiling,
            Some(1000)
        );
        assert_eq!(PlanTier::Pro.capabilities().monthly_view_ceiling, None);
        assert_eq!(PlanTier::Elite.capabilities().monthly_view_ceiling, None);
    }

    #[test]
    fn test_over_ceiling_boundary() {
        assert!(!QuotaGate::is_over_ceiling(999, PlanTier::Free));
        assert!(QuotaGate::is_over_ceiling(1000, PlanTier::Free));
        assert!(QuotaGate::is_over_ceiling(1001, PlanTier::Free));
    }

    #[test]
    fn test_paid_tiers_unlimited() {
        assert!(!QuotaGate::is_over_ceiling(1_000_000, PlanTier::Pro));
        assert!(!QuotaGate::is_over_ceiling(1_000_000, PlanTier::Elite));
    }

    #[tokio::test]
    async fn test_render_mode_under_ceiling() {
        let gate = QuotaGate::new(Arc::new(AccountIdResolver));
        let mode = gate.render_mode(&page(999), PlanTier::Free, None).await;
        assert_eq!(mode, RenderMode::Normal);
    }

    #[tokio::test]
    async fn test_render_mode_over_ceiling_for_visitor() {
        let gate = QuotaGate::new(Arc::new(AccountIdResolver));
        let mode = gate.render_mode(&page(1000), PlanTier::Free, None).await;
        assert_eq!(mode, RenderMode::LimitReached);
    }

    #[tokio::test]
    async fn test_render_mode_owner_bypass() {
        let gate = QuotaGate::new(Arc::new(AccountIdResolver));
        let mode = gate
            .render_mode(&page(1000), PlanTier::Free, Some("owner-1"))
            .await;
        assert_eq!(mode, RenderMode::Normal);

        // 其他已认证账户不享受旁路
        let mode = gate
            .render_mode(&page(1000), PlanTier::Free, Some("someone-else"))
            .await;
        assert_eq!(mode, RenderMode::LimitReached);
    }
}

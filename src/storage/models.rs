use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter};

use crate::utils::DeviceClass;

/// 页面（发布状态与累计浏览计数）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub id: String,
    pub account_id: String,
    pub published: bool,
    pub view_count: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 账户（页面所有者，plan_tier 决定配额档位）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub plan_tier: PlanTier,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 一条访问记录（只追加）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRecord {
    pub page_id: String,
    pub referrer: Option<String>,
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub device_class: DeviceClass,
    /// 客户端指纹哈希（base-36，启发式标识，非安全身份）
    pub visitor_hash: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// 套餐档位
///
/// 封闭枚举，配额能力统一查 `services::quota::PlanCapabilities`，
/// 不允许散落的字符串比较。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Pro,
    Elite,
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::Pro => write!(f, "pro"),
            Self::Elite => write!(f, "elite"),
        }
    }
}

impl std::str::FromStr for PlanTier {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "elite" => Ok(Self::Elite),
            _ => Err(format!(
                "Invalid plan tier: '{}'. Valid: free, pro, elite",
                s
            )),
        }
    }
}

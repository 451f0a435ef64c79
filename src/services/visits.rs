//! 访问记录构建
//!
//! 把一次页面加载的原始信息（referrer、query、UA、客户端指纹哈希）
//! 归一化为一条 VisitRecord。来源推导优先级：
//! utm_source 参数 → 通用 ref 参数 → ref:{referrer 域名} → direct

use std::borrow::Cow;

use chrono::Utc;

use crate::storage::models::VisitRecord;
use crate::utils::classify_device;

/// 构建访问记录
pub fn build_visit_record(
    page_id: &str,
    referrer: Option<&str>,
    query: Option<&str>,
    user_agent: Option<&str>,
    fingerprint: Option<&str>,
) -> VisitRecord {
    VisitRecord {
        page_id: page_id.to_string(),
        referrer: referrer.map(String::from),
        source: derive_source(query, referrer),
        user_agent: user_agent.map(String::from),
        device_class: classify_device(user_agent),
        visitor_hash: fingerprint.map(String::from),
        created_at: Utc::now(),
    }
}

/// 从原始数据推导流量来源
fn derive_source(query: Option<&str>, referrer: Option<&str>) -> Option<String> {
    // 1. 检查 utm_source 参数
    if let Some(query) = query
        && let Some(utm_source) = extract_query_param(query, "utm_source")
    {
        return Some(utm_source.into_owned());
    }

    // 2. 通用 ref 参数兜底
    if let Some(query) = query
        && let Some(r) = extract_query_param(query, "ref")
    {
        return Some(r.into_owned());
    }

    // 3. 有 Referer header → ref:{domain}
    if let Some(referer_url) = referrer
        && let Some(domain) = extract_domain(referer_url)
    {
        return Some(format!("ref:{}", domain));
    }

    // 4. 都没有 → direct
    Some("direct".to_string())
}

/// 从 query string 提取指定参数值
#[inline]
fn extract_query_param<'a>(query: &'a str, key: &str) -> Option<Cow<'a, str>> {
    for part in query.split('&') {
        if let Some(value) = part.strip_prefix(key).and_then(|s| s.strip_prefix('=')) {
            // urlencoding::decode 返回 Cow，未编码时零分配
            return urlencoding::decode(value).ok();
        }
    }
    None
}

/// 从 URL 提取域名
#[inline]
fn extract_domain(url: &str) -> Option<&str> {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);

    without_scheme
        .split(&['/', ':', '?', '#'][..])
        .next()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DeviceClass;

    const PAGE_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_utm_source_wins() {
        let source = derive_source(
            Some("utm_source=newsletter&ref=ignored"),
            Some("https://example.com/post"),
        );
        assert_eq!(source.as_deref(), Some("newsletter"));
    }

    #[test]
    fn test_ref_param_fallback() {
        let source = derive_source(Some("ref=producthunt"), None);
        assert_eq!(source.as_deref(), Some("producthunt"));
    }

    #[test]
    fn test_referrer_domain_fallback() {
        let source = derive_source(None, Some("https://news.ycombinator.com/item?id=1"));
        assert_eq!(source.as_deref(), Some("ref:news.ycombinator.com"));
    }

    #[test]
    fn test_direct_when_nothing_present() {
        assert_eq!(derive_source(None, None).as_deref(), Some("direct"));
    }

    #[test]
    fn test_url_encoded_param() {
        let source = derive_source(Some("utm_source=my%20campaign"), None);
        assert_eq!(source.as_deref(), Some("my campaign"));
    }

    #[test]
    fn test_build_visit_record_classifies_device() {
        let record = build_visit_record(
            PAGE_ID,
            None,
            None,
            Some("Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X)"),
            Some("k3j2l1"),
        );
        assert_eq!(record.page_id, PAGE_ID);
        assert_eq!(record.device_class, DeviceClass::Mobile);
        assert_eq!(record.visitor_hash.as_deref(), Some("k3j2l1"));
        assert_eq!(record.source.as_deref(), Some("direct"));
    }
}

//! IP 地址处理工具
//!
//! 提供统一的客户端 IP 提取功能。限流器必须能识别请求来源，
//! 无法识别来源的请求会被上层直接拒绝。

use actix_web::HttpRequest;
use actix_web::http::header::HeaderMap;

/// 从 HttpRequest 提取真实客户端 IP
///
/// 优先级（与反向代理/CDN 部署形态一致）：
/// 1. X-Forwarded-For 链的第一个条目（原始客户端）
/// 2. X-Real-IP
/// 3. CF-Connecting-IP（CDN 场景）
/// 4. 连接对端地址（直连场景）
///
/// 全部缺失时返回 None，由调用方决定拒绝策略。
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    extract_forwarded_ip_from_headers(req.headers())
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
}

/// 从 HeaderMap 提取转发的 IP
pub fn extract_forwarded_ip_from_headers(headers: &HeaderMap) -> Option<String> {
    // 优先 X-Forwarded-For（取第一个，即原始客户端 IP）
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            // 其次 X-Real-IP
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .or_else(|| {
            // 最后 CF-Connecting-IP
            headers
                .get("cf-connecting-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::{HeaderName, HeaderValue};

    fn headers_with(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let headers = headers_with(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1, 10.0.0.2")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_beats_real_ip() {
        let headers = headers_with(&[
            ("x-real-ip", "198.51.100.2"),
            ("x-forwarded-for", "203.0.113.7"),
        ]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_real_ip_fallback() {
        let headers = headers_with(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("198.51.100.2".to_string())
        );
    }

    #[test]
    fn test_cdn_header_fallback() {
        let headers = headers_with(&[("cf-connecting-ip", "192.0.2.33")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("192.0.2.33".to_string())
        );
    }

    #[test]
    fn test_no_headers_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(extract_forwarded_ip_from_headers(&headers), None);
    }

    #[test]
    fn test_empty_forwarded_for_falls_through() {
        let headers = headers_with(&[("x-forwarded-for", ""), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(
            extract_forwarded_ip_from_headers(&headers),
            Some("198.51.100.2".to_string())
        );
    }
}

pub mod device;
pub mod ip;

pub use device::{DeviceClass, classify_device};

/// 校验页面 ID 是否为合法 UUID
///
/// 计数入口在任何数据库访问之前先做此校验。
pub fn is_valid_page_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_page_id() {
        assert!(is_valid_page_id("550e8400-e29b-41d4-a716-446655440000"));
        assert!(is_valid_page_id("00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_invalid_page_id() {
        assert!(!is_valid_page_id(""));
        assert!(!is_valid_page_id("not-a-uuid"));
        assert!(!is_valid_page_id("550e8400e29b41d4a716"));
        assert!(!is_valid_page_id("550e8400-e29b-41d4-a716-44665544000Z"));
        // SQL 注入尝试必须在校验层被拒绝
        assert!(!is_valid_page_id("1; DROP TABLE pages--"));
    }
}

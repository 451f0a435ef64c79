//! User-Agent 设备分类
//!
//! 访问记录按 UA 粗分为 tablet / mobile / desktop 三类。
//! 平板模式必须在通用移动模式之前匹配（iPad UA 同时含有 "Mobile"）。

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

/// 设备分类（访问记录的 device_class 列）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceClass {
    Tablet,
    Mobile,
    Desktop,
}

impl std::fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// 平板 UA 特征（先于 mobile 检查）
const TABLET_PATTERNS: [&str; 5] = ["ipad", "tablet", "kindle", "silk", "playbook"];

/// 移动设备 UA 特征
const MOBILE_PATTERNS: [&str; 7] = [
    "mobi",
    "iphone",
    "ipod",
    "android",
    "blackberry",
    "opera mini",
    "windows phone",
];

/// 按 UA 字符串分类设备
///
/// 未知或缺失的 UA 一律归为 desktop。
pub fn classify_device(user_agent: Option<&str>) -> DeviceClass {
    let Some(ua) = user_agent else {
        return DeviceClass::Desktop;
    };
    let ua = ua.to_lowercase();

    if TABLET_PATTERNS.iter().any(|p| ua.contains(p)) {
        return DeviceClass::Tablet;
    }
    if MOBILE_PATTERNS.iter().any(|p| ua.contains(p)) {
        return DeviceClass::Mobile;
    }
    DeviceClass::Desktop
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPAD_UA: &str =
        "Mozilla/5.0 (iPad; CPU OS 16_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";
    const IPHONE_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 16_0 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID_TABLET_UA: &str =
        "Mozilla/5.0 (Linux; Android 13; SM-X700 Tablet) AppleWebKit/537.36";
    const DESKTOP_UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/120.0";

    #[test]
    fn test_tablet_checked_before_mobile() {
        // iPad UA 同时包含 "Mobile"，必须判为 tablet
        assert_eq!(classify_device(Some(IPAD_UA)), DeviceClass::Tablet);
        assert_eq!(
            classify_device(Some(ANDROID_TABLET_UA)),
            DeviceClass::Tablet
        );
    }

    #[test]
    fn test_mobile_classification() {
        assert_eq!(classify_device(Some(IPHONE_UA)), DeviceClass::Mobile);
        assert_eq!(
            classify_device(Some("Mozilla/5.0 (Linux; Android 13; Pixel 8)")),
            DeviceClass::Mobile
        );
    }

    #[test]
    fn test_desktop_default() {
        assert_eq!(classify_device(Some(DESKTOP_UA)), DeviceClass::Desktop);
        assert_eq!(classify_device(Some("")), DeviceClass::Desktop);
        assert_eq!(classify_device(None), DeviceClass::Desktop);
    }

    #[test]
    fn test_display_lowercase() {
        assert_eq!(DeviceClass::Tablet.to_string(), "tablet");
        assert_eq!(DeviceClass::Mobile.to_string(), "mobile");
        assert_eq!(DeviceClass::Desktop.to_string(), "desktop");
    }
}

//! 客户端指纹
//!
//! 由浏览器/显示特征组合出会话内稳定的伪唯一标识：
//! canvas 渲染签名 + 屏幕几何 + 时区 + locale + UA，拼接后过
//! 32 位乘法-异或滚动哈希，base-36 编码。
//!
//! 这是启发式标识，不是安全边界：碰撞与伪造都在预期内且被容忍。
//! 该指纹只用于会话级去重，绝不参与服务端限流哈希。

/// 指纹输入特征
#[derive(Debug, Clone)]
pub struct FingerprintInputs {
    pub canvas_signature: String,
    pub screen_width: u32,
    pub screen_height: u32,
    pub color_depth: u32,
    /// IANA 时区名，如 "Asia/Shanghai"
    pub timezone: String,
    pub locale: String,
    pub user_agent: String,
}

/// 32 位乘法-异或滚动哈希
pub fn rolling_hash32(input: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in input.bytes() {
        hash = hash.wrapping_mul(31) ^ u32::from(byte);
    }
    hash
}

/// base-36 编码（小写）
pub fn to_base36(mut value: u32) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

/// 计算指纹哈希
pub fn compute_fingerprint(inputs: &FingerprintInputs) -> String {
    let combined = format!(
        "{}|{}x{}x{}|{}|{}|{}",
        inputs.canvas_signature,
        inputs.screen_width,
        inputs.screen_height,
        inputs.color_depth,
        inputs.timezone,
        inputs.locale,
        inputs.user_agent,
    );
    to_base36(rolling_hash32(&combined))
}

//! 会话键值存储抽象
//!
//! 浏览器端对应 sessionStorage（按浏览器会话隔离）。会话内的
//! 去重标志、遮罩关闭标志等都走这层显式接口，不用进程级全局量。

use dashmap::DashMap;

/// 会话作用域的键值存储
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn clear(&self);
}

/// 内存实现（每个实例即一个会话）
#[derive(Default)]
pub struct MemorySessionStore {
    entries: DashMap<String, String>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.clone())
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get("k"), None);

        store.set("k", "v");
        assert_eq!(store.get("k").as_deref(), Some("v"));

        store.set("k", "v2");
        assert_eq!(store.get("k").as_deref(), Some("v2"));

        store.clear();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn test_stores_are_isolated() {
        // 两个实例模拟两个浏览器会话
        let a = MemorySessionStore::new();
        let b = MemorySessionStore::new();

        a.set("visited", "1");
        assert_eq!(b.get("visited"), None);
    }
}

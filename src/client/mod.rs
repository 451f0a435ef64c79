//! 浏览器侧行为的库级模型
//!
//! 指纹生成和会话内去重在真实产品中跑在浏览器里；这里以
//! 可测试的库形式建模，服务端 SDK/嵌入端复用同一套语义：
//! - `fingerprint`: 会话内稳定的启发式访客标识
//! - `session`: 显式的会话键值存储抽象（取代进程级全局状态）
//! - `recorder`: 每 (页面, 会话) 至多一条访问记录

pub mod fingerprint;
pub mod recorder;
pub mod session;

pub use fingerprint::{FingerprintInputs, compute_fingerprint};
pub use recorder::{VisitRecorder, VisitSink};
pub use session::{MemorySessionStore, SessionStore};

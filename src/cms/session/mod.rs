//! 管理端会话：登录标记与示例数据初始化标记
//!
//! 标志位持久化在本地 SQLite（`local_flags` 表），测试或临时会话可用内存实现。

pub mod dao;
pub mod models;
pub mod service;

pub use dao::{FlagDao, FlagStore, MemoryFlagStore};
pub use models::{seeded_key, AdminCredentials, AUTH_KEY, AUTH_VALUE, SEEDED_VALUE};
pub use service::SessionContext;

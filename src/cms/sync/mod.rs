//! 实体同步器：决定数据来源，维护当前页面的权威集合

pub mod listener;
pub mod models;
pub mod service;

pub use listener::{EmptyNotificationListener, NotificationListener};
pub use models::{MutationOutcome, SyncState};
pub use service::EntitySyncer;

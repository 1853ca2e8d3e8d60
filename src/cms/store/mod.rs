//! 实体存储能力接口
//!
//! 同步器只依赖 [`EntityStore`]，远程 / 本地默认两种实现在组合根（`CmsClient::store`）一次性选定。

pub mod api;
pub mod memory;

use crate::cms::entities::Entity;
use crate::cms::types::StoreResult;
use async_trait::async_trait;

pub use api::{RemoteConfig, RemoteStore};
pub use memory::DefaultStore;

/// 存储的数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// 已配置的远程行存储
    Remote,
    /// 会话内的内置默认数据，不持久化
    LocalDefault,
}

/// 单个实体类型的 list / upsert / delete
#[async_trait]
pub trait EntityStore<T: Entity>: Send + Sync {
    fn mode(&self) -> StoreMode;

    /// 全量读取，按实体的排序字段升序
    async fn list(&self) -> StoreResult<Vec<T>>;

    /// 无主键时插入，有主键时按主键更新或插入；返回受影响的行
    async fn upsert(&self, record: &T) -> StoreResult<Vec<T>>;

    /// 按主键删除，返回被删除的行（未命中时为空）
    async fn delete(&self, id: i64) -> StoreResult<Vec<T>>;
}

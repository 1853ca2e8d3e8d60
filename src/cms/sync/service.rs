//! 实体同步服务
//!
//! 每次页面访问一个同步器：`load` 解析数据来源，之后每次写入都以全量重新拉取结束
//! （invalidate-and-refetch），从不在本地打补丁。

use super::listener::{EmptyNotificationListener, NotificationListener};
use super::models::*;
use crate::cms::entities::{without_id, Entity};
use crate::cms::session::SessionContext;
use crate::cms::store::memory::surrogate_id;
use crate::cms::store::{EntityStore, StoreMode};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct EntitySyncer<T: Entity> {
    store: Arc<dyn EntityStore<T>>,
    session: Arc<SessionContext>,
    listener: Arc<dyn NotificationListener>,
    /// 当前权威集合（最后一次成功解析的结果）
    items: Vec<T>,
    state: SyncState,
}

impl<T: Entity> EntitySyncer<T> {
    /// 创建同步器（使用默认空监听器）
    pub fn new(store: Arc<dyn EntityStore<T>>, session: Arc<SessionContext>) -> Self {
        Self::with_listener(store, session, Arc::new(EmptyNotificationListener))
    }

    pub fn with_listener(
        store: Arc<dyn EntityStore<T>>,
        session: Arc<SessionContext>,
        listener: Arc<dyn NotificationListener>,
    ) -> Self {
        Self {
            store,
            session,
            listener,
            items: Vec::new(),
            state: SyncState::Unresolved,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn mode(&self) -> StoreMode {
        self.store.mode()
    }

    /// 解析数据来源并加载集合
    ///
    /// - 本地默认模式：采用存储中的内置默认数据
    /// - 远程模式且结果非空：原样采用
    /// - 远程模式且结果为空：先展示默认数据，未标记过时写入示例数据并重新拉取
    pub async fn load(&mut self) {
        info!("[EntitySync:{}] 开始加载，模式: {:?}", T::NAME, self.store.mode());
        match self.store.mode() {
            StoreMode::LocalDefault => {
                match self.store.list().await {
                    Ok(rows) => self.items = rows,
                    Err(e) => {
                        warn!("[EntitySync:{}] 读取本地默认数据失败: {}", T::NAME, e);
                        self.items = T::defaults();
                    }
                }
                self.state = SyncState::LocalDefault;
                self.notify_changed().await;
            }
            StoreMode::Remote => match self.store.list().await {
                Ok(rows) if !rows.is_empty() => {
                    info!("[EntitySync:{}] ✅ 远程返回 {} 行", T::NAME, rows.len());
                    self.items = rows;
                    self.state = SyncState::RemoteSourced;
                    self.notify_changed().await;
                }
                Ok(_) => {
                    info!("[EntitySync:{}] 远程为空，先展示内置默认数据", T::NAME);
                    self.items = T::defaults();
                    self.state = SyncState::RemoteSourced;
                    self.notify_changed().await;
                    self.seed_once().await;
                }
                Err(e) => {
                    error!("[EntitySync:{}] 加载失败: {}", T::NAME, e);
                    self.toast(TOAST_LOAD_FAILED, Some(e.description())).await;
                }
            },
        }
    }

    /// 新建草稿：远程模式不带主键（由服务端生成），本地模式用毫秒时间戳代替
    pub fn new_draft(&self) -> T {
        let mut draft = T::blank();
        if self.store.mode() == StoreMode::LocalDefault {
            draft.set_id(Some(surrogate_id()));
        }
        draft
    }

    /// 保存草稿（有主键则按主键更新或插入，否则插入）
    pub async fn save(&mut self, draft: &T) -> MutationOutcome {
        let resolved = self.begin_mutation();
        let outcome = match self.store.upsert(draft).await {
            Ok(rows) => {
                debug!("[EntitySync:{}] 保存成功，返回 {} 行", T::NAME, rows.len());
                self.refetch().await;
                self.toast(TOAST_SAVED, None).await;
                MutationOutcome::Applied
            }
            Err(e) => {
                error!("[EntitySync:{}] 保存失败: {}", T::NAME, e);
                self.toast(TOAST_SAVE_FAILED, Some(e.description())).await;
                MutationOutcome::Rejected
            }
        };
        self.state = resolved;
        outcome
    }

    /// 按主键删除；只应在用户确认后调用
    pub async fn delete(&mut self, id: i64) -> MutationOutcome {
        let resolved = self.begin_mutation();
        let outcome = match self.store.delete(id).await {
            Ok(rows) => {
                debug!("[EntitySync:{}] 删除 id={}，影响 {} 行", T::NAME, id, rows.len());
                self.refetch().await;
                self.toast(TOAST_DELETED, None).await;
                MutationOutcome::Applied
            }
            Err(e) => {
                error!("[EntitySync:{}] 删除失败: {}", T::NAME, e);
                self.toast(TOAST_DELETE_FAILED, Some(e.description())).await;
                MutationOutcome::Rejected
            }
        };
        self.state = resolved;
        outcome
    }

    /// 手动写入示例数据（不修改 seeded 标记）；仅远程模式有效
    pub async fn seed_examples(&mut self) -> MutationOutcome {
        if self.store.mode() != StoreMode::Remote {
            debug!("[EntitySync:{}] 本地默认模式，忽略写入示例数据", T::NAME);
            return MutationOutcome::Rejected;
        }
        let resolved = self.begin_mutation();
        let outcome = self.insert_defaults().await;
        self.state = resolved;
        outcome
    }

    /// 全量重新拉取；失败时保留当前集合
    pub async fn refetch(&mut self) {
        match self.store.list().await {
            Ok(rows) => {
                debug!("[EntitySync:{}] 重新拉取 {} 行", T::NAME, rows.len());
                self.items = rows;
                self.notify_changed().await;
            }
            Err(e) => {
                error!("[EntitySync:{}] 重新拉取失败: {}", T::NAME, e);
                self.toast(TOAST_LOAD_FAILED, Some(e.description())).await;
            }
        }
    }

    /// 首次观察到远程为空时写入一次示例数据
    ///
    /// 持久化标记保证跨会话只写一次；进程内声明防止并发加载重复写入。
    async fn seed_once(&mut self) {
        if !self.session.try_claim_seed(T::NAME).await {
            debug!("[EntitySync:{}] 示例数据正在写入，跳过", T::NAME);
            return;
        }

        match self.session.is_seeded(T::NAME).await {
            Ok(false) => {
                if self.insert_defaults().await.is_applied() {
                    if let Err(e) = self.session.mark_seeded(T::NAME).await {
                        warn!("[EntitySync:{}] 写入 seeded 标记失败: {:#}", T::NAME, e);
                    }
                }
            }
            Ok(true) => {
                debug!("[EntitySync:{}] 已写入过示例数据，不再重复", T::NAME);
            }
            Err(e) => {
                warn!("[EntitySync:{}] 读取 seeded 标记失败，跳过: {:#}", T::NAME, e);
            }
        }

        self.session.release_seed(T::NAME).await;
    }

    /// 逐条插入内置默认数据（去掉主键），成功后重新拉取
    async fn insert_defaults(&mut self) -> MutationOutcome {
        info!("[EntitySync:{}] 📦 写入示例数据", T::NAME);
        for row in T::defaults() {
            if let Err(e) = self.store.upsert(&without_id(row)).await {
                error!("[EntitySync:{}] 写入示例数据失败: {}", T::NAME, e);
                self.toast(TOAST_SEED_FAILED, Some(e.description())).await;
                return MutationOutcome::Rejected;
            }
        }
        self.refetch().await;
        self.toast(TOAST_SEEDED, None).await;
        MutationOutcome::Applied
    }

    fn begin_mutation(&mut self) -> SyncState {
        let resolved = match self.state {
            SyncState::Mutating | SyncState::Unresolved => match self.store.mode() {
                StoreMode::Remote => SyncState::RemoteSourced,
                StoreMode::LocalDefault => SyncState::LocalDefault,
            },
            other => other,
        };
        self.state = SyncState::Mutating;
        resolved
    }

    async fn toast(&self, title: &str, description: Option<String>) {
        self.listener.on_toast(title.to_string(), description).await;
    }

    async fn notify_changed(&self) {
        match serde_json::to_string(&self.items) {
            Ok(json) => {
                self.listener
                    .on_collection_changed(T::NAME.to_string(), json)
                    .await
            }
            Err(e) => warn!("[EntitySync:{}] 序列化集合失败: {}", T::NAME, e),
        }
    }
}

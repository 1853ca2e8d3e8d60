//! 单元测试共用的替身：计数的"远程"存储、记录通知的监听器、内存会话

use crate::cms::entities::Entity;
use crate::cms::session::{AdminCredentials, MemoryFlagStore, SessionContext};
use crate::cms::store::{DefaultStore, EntityStore, StoreMode};
use crate::cms::sync::NotificationListener;
use crate::cms::types::{StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use tokio::sync::Mutex;

static INIT_LOGGER: Once = Once::new();

pub fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::EnvFilter;

        let filter_layer = EnvFilter::new("info,studio_cms_core_rust=debug,sqlx=warn");

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_test_writer();

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    });
}

pub fn memory_session() -> Arc<SessionContext> {
    Arc::new(SessionContext::new(
        Arc::new(MemoryFlagStore::new()),
        AdminCredentials::default(),
    ))
}

/// 行为等同远程表的内存存储：空表起步，主键自增，可注入写入失败
pub struct FakeRemote<T> {
    rows: DefaultStore<T>,
    next_id: Mutex<i64>,
    pub fail_writes: AtomicBool,
    pub fail_reads: AtomicBool,
    pub lists: AtomicUsize,
    pub upserts: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl<T: Entity> FakeRemote<T> {
    pub fn empty() -> Self {
        Self::with_rows(Vec::new())
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        let next = rows.iter().filter_map(|r| r.id()).max().unwrap_or(0) + 1;
        Self {
            rows: DefaultStore::with_rows(rows),
            next_id: Mutex::new(next),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
            lists: AtomicUsize::new(0),
            upserts: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    fn rejected() -> StoreError {
        StoreError::Remote {
            status: 409,
            message: "duplicate key value violates unique constraint".to_string(),
        }
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for FakeRemote<T> {
    fn mode(&self) -> StoreMode {
        StoreMode::Remote
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        self.lists.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }
        self.rows.list().await
    }

    async fn upsert(&self, record: &T) -> StoreResult<Vec<T>> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }
        let mut record = record.clone();
        if record.id().is_none() {
            let mut next = self.next_id.lock().await;
            record.set_id(Some(*next));
            *next += 1;
        }
        self.rows.upsert(&record).await
    }

    async fn delete(&self, id: i64) -> StoreResult<Vec<T>> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected());
        }
        self.rows.delete(id).await
    }
}

/// 记录所有 toast 标题
#[derive(Default)]
pub struct RecordingListener {
    pub toasts: Mutex<Vec<(String, Option<String>)>>,
    pub changes: AtomicUsize,
}

impl RecordingListener {
    pub async fn titles(&self) -> Vec<String> {
        self.toasts
            .lock()
            .await
            .iter()
            .map(|(t, _)| t.clone())
            .collect()
    }
}

#[async_trait]
impl NotificationListener for RecordingListener {
    async fn on_toast(&self, title: String, description: Option<String>) {
        self.toasts.lock().await.push((title, description));
    }

    async fn on_collection_changed(&self, _entity: String, _rows_json: String) {
        self.changes.fetch_add(1, Ordering::SeqCst);
    }
}

//! 本地默认模式的内存存储
//!
//! 以实体的内置默认数据初始化，只在当前会话（页面访问）内有效。

use super::{EntityStore, StoreMode};
use crate::cms::entities::{sort_rows, Entity};
use crate::cms::types::StoreResult;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

/// 本地代理主键：当前毫秒时间戳，唯一性仅尽力而为
pub fn surrogate_id() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub struct DefaultStore<T> {
    rows: Mutex<Vec<T>>,
}

impl<T: Entity> Default for DefaultStore<T> {
    fn default() -> Self {
        Self::with_rows(T::defaults())
    }
}

impl<T: Entity> DefaultStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Mutex::new(rows),
        }
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for DefaultStore<T> {
    fn mode(&self) -> StoreMode {
        StoreMode::LocalDefault
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let mut rows = self.rows.lock().await.clone();
        sort_rows(&mut rows);
        Ok(rows)
    }

    async fn upsert(&self, record: &T) -> StoreResult<Vec<T>> {
        let mut rows = self.rows.lock().await;
        let mut record = record.clone();

        if record.id().is_none() {
            let mut id = surrogate_id();
            // 同一毫秒内连续新增时顺延
            while rows.iter().any(|r| r.id() == Some(id)) {
                id += 1;
            }
            record.set_id(Some(id));
        }

        match rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => {
                debug!("[DefaultStore:{}] 替换 id={:?}", T::NAME, record.id());
                *existing = record.clone();
            }
            None => {
                debug!("[DefaultStore:{}] 追加 id={:?}", T::NAME, record.id());
                rows.push(record.clone());
            }
        }
        Ok(vec![record])
    }

    async fn delete(&self, id: i64) -> StoreResult<Vec<T>> {
        let mut rows = self.rows.lock().await;
        let (removed, kept): (Vec<T>, Vec<T>) =
            rows.drain(..).partition(|r| r.id() == Some(id));
        *rows = kept;
        Ok(removed)
    }
}

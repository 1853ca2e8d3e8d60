//! 标志位数据访问层
//!
//! 简单的字符串键值存储，对应浏览器端的 localStorage。

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{Pool, Sqlite};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::debug;

/// 持久化键值标志存储
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// 基于 sqlx 的标志存储（表结构由 migrations 管理）
pub struct FlagDao {
    db: Pool<Sqlite>,
}

impl FlagDao {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlagStore for FlagDao {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM local_flags WHERE key = ?")
                .bind(key)
                .fetch_optional(&self.db)
                .await
                .context(format!("读取标志位失败: {}", key))?;
        debug!("[FlagDAO] get {} -> {:?}", key, value);
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO local_flags (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.db)
        .await
        .context(format!("写入标志位失败: {}", key))?;
        debug!("[FlagDAO] set {} = {}", key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM local_flags WHERE key = ?")
            .bind(key)
            .execute(&self.db)
            .await
            .context(format!("删除标志位失败: {}", key))?;
        debug!("[FlagDAO] remove {}", key);
        Ok(())
    }
}

/// 内存标志存储（进程退出即丢失）
#[derive(Default)]
pub struct MemoryFlagStore {
    flags: Mutex<HashMap<String, String>>,
}

impl MemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for MemoryFlagStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.flags.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.flags
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.flags.lock().await.remove(key);
        Ok(())
    }
}

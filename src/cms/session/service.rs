//! 会话上下文
//!
//! 取代散落各处的 localStorage 访问：启动时 `init` 读取登录标记，登出时清除。
//! 同步器通过它读写 `seeded_<entity>` 标记。

use super::dao::FlagStore;
use super::models::{seeded_key, AdminCredentials, AUTH_KEY, AUTH_VALUE, SEEDED_VALUE};
use anyhow::{bail, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct SessionContext {
    flags: Arc<dyn FlagStore>,
    credentials: AdminCredentials,
    authenticated: AtomicBool,
    /// 本进程内正在写入示例数据的实体
    seeding: Mutex<HashSet<&'static str>>,
}

impl SessionContext {
    pub fn new(flags: Arc<dyn FlagStore>, credentials: AdminCredentials) -> Self {
        Self {
            flags,
            credentials,
            authenticated: AtomicBool::new(false),
            seeding: Mutex::new(HashSet::new()),
        }
    }

    /// 启动时读取持久化的登录标记
    pub async fn init(&self) -> Result<bool> {
        let value = self.flags.get(AUTH_KEY).await?;
        let authenticated = value.as_deref() == Some(AUTH_VALUE);
        self.authenticated.store(authenticated, Ordering::SeqCst);
        info!("[Session] 初始化完成，已登录: {}", authenticated);
        Ok(authenticated)
    }

    /// 校验管理员账号，成功时写入登录标记
    pub async fn login(&self, email: &str, password: &str) -> Result<bool> {
        if !self.credentials.matches(email, password) {
            warn!("[Session] 登录失败: {}", email);
            return Ok(false);
        }
        self.flags.set(AUTH_KEY, AUTH_VALUE).await?;
        self.authenticated.store(true, Ordering::SeqCst);
        info!("[Session] ✅ 登录成功: {}", email);
        Ok(true)
    }

    /// 清除登录标记；`seeded_*` 标记保留
    pub async fn logout(&self) -> Result<()> {
        self.flags.remove(AUTH_KEY).await?;
        self.authenticated.store(false, Ordering::SeqCst);
        info!("[Session] 已登出");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    /// 路由守卫：未登录时返回错误
    pub fn require_auth(&self) -> Result<()> {
        if !self.is_authenticated() {
            bail!("未登录，请先执行 login");
        }
        Ok(())
    }

    pub async fn is_seeded(&self, entity: &str) -> Result<bool> {
        let value = self.flags.get(&seeded_key(entity)).await?;
        Ok(value.as_deref() == Some(SEEDED_VALUE))
    }

    pub async fn mark_seeded(&self, entity: &str) -> Result<()> {
        self.flags.set(&seeded_key(entity), SEEDED_VALUE).await?;
        info!("[Session] 标记 {} 已写入示例数据", entity);
        Ok(())
    }

    /// 声明本进程开始为 `entity` 写入示例数据；已有进行中的写入时返回 false
    pub async fn try_claim_seed(&self, entity: &'static str) -> bool {
        self.seeding.lock().await.insert(entity)
    }

    pub async fn release_seed(&self, entity: &'static str) {
        self.seeding.lock().await.remove(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::session::MemoryFlagStore;

    fn session() -> (Arc<MemoryFlagStore>, SessionContext) {
        let flags = Arc::new(MemoryFlagStore::new());
        let ctx = SessionContext::new(flags.clone(), AdminCredentials::default());
        (flags, ctx)
    }

    #[tokio::test]
    async fn login_writes_marker_and_logout_clears_it() -> Result<()> {
        let (flags, ctx) = session();
        assert!(!ctx.init().await?);
        assert!(ctx.require_auth().is_err());

        assert!(!ctx.login("admin@visualstoryteller.app", "wrong").await?);
        assert_eq!(flags.get(AUTH_KEY).await?, None);

        assert!(ctx.login("admin@visualstoryteller.app", "admin123").await?);
        assert_eq!(flags.get(AUTH_KEY).await?.as_deref(), Some("1"));
        assert!(ctx.require_auth().is_ok());

        ctx.mark_seeded("hero").await?;
        ctx.logout().await?;
        assert!(!ctx.is_authenticated());
        assert!(ctx.is_seeded("hero").await?);
        Ok(())
    }

    #[tokio::test]
    async fn init_restores_marker_from_store() -> Result<()> {
        let (flags, ctx) = session();
        flags.set(AUTH_KEY, AUTH_VALUE).await?;
        assert!(ctx.init().await?);
        assert!(ctx.is_authenticated());
        Ok(())
    }

    #[tokio::test]
    async fn seed_claim_is_exclusive_until_released() {
        let (_flags, ctx) = session();
        assert!(ctx.try_claim_seed("pricing").await);
        assert!(!ctx.try_claim_seed("pricing").await);
        assert!(ctx.try_claim_seed("hero").await);
        ctx.release_seed("pricing").await;
        assert!(ctx.try_claim_seed("pricing").await);
    }
}

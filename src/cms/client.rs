//! 管理端客户端：组合根
//!
//! 在这里一次性决定每个实体用远程存储还是本地默认存储，页面和同步器不再关心。

use crate::cms::dashboard::{load_stats, DashboardStats};
use crate::cms::db::create_sqlite_pool_with_migration;
use crate::cms::entities::{Entity, WhatsAppSetting};
use crate::cms::page::AdminPage;
use crate::cms::session::{AdminCredentials, FlagDao, FlagStore, MemoryFlagStore, SessionContext};
use crate::cms::store::{DefaultStore, EntityStore, RemoteConfig, RemoteStore};
use crate::cms::sync::{EmptyNotificationListener, EntitySyncer, NotificationListener};
use crate::cms::whatsapp;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// 客户端配置
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// 远程行存储；`None` 表示未配置，所有实体走本地默认数据
    pub remote: Option<RemoteConfig>,
    /// 本地标志位 SQLite 数据库 URL
    ///
    /// 例如：`sqlite://studio_admin.db?mode=rwc`
    pub flag_db_url: String,
    /// 管理员账号
    pub credentials: AdminCredentials,
}

impl ClientConfig {
    /// 创建默认配置
    pub fn new(remote: Option<RemoteConfig>) -> Self {
        Self {
            remote,
            flag_db_url: "sqlite://studio_admin.db?mode=rwc".to_string(),
            credentials: AdminCredentials::default(),
        }
    }

    /// 远程配置取自 `SUPABASE_URL` / `SUPABASE_ANON_KEY`
    pub fn from_env() -> Self {
        Self::new(RemoteConfig::from_env())
    }
}

#[derive(Clone)]
pub struct CmsClient {
    config: ClientConfig,
    /// 带认证头的 HTTP 客户端，仅在已配置远程服务时存在
    http: Option<reqwest::Client>,
    session: Arc<SessionContext>,
    listener: Arc<dyn NotificationListener>,
}

impl CmsClient {
    /// 创建客户端：打开标志位数据库并读取登录标记
    pub async fn new(config: ClientConfig) -> Result<Self> {
        let pool = create_sqlite_pool_with_migration(&config.flag_db_url).await?;
        let client = Self::with_flag_store(config, Arc::new(FlagDao::new(pool)))?;
        client.session.init().await?;
        Ok(client)
    }

    /// 标志位只保存在内存中的客户端
    pub fn in_memory(config: ClientConfig) -> Result<Self> {
        Self::with_flag_store(config, Arc::new(MemoryFlagStore::new()))
    }

    pub fn with_flag_store(config: ClientConfig, flags: Arc<dyn FlagStore>) -> Result<Self> {
        let http = config
            .remote
            .as_ref()
            .map(|remote| remote.http_client())
            .transpose()?;
        match &config.remote {
            Some(remote) => info!("[CmsClient] 使用远程存储: {}", remote.url),
            None => info!("[CmsClient] 未配置远程存储，使用内置默认数据"),
        }
        let session = Arc::new(SessionContext::new(flags, config.credentials.clone()));
        Ok(Self {
            config,
            http,
            session,
            listener: Arc::new(EmptyNotificationListener),
        })
    }

    /// 注册通知监听器
    pub fn set_notification_listener(&mut self, listener: Arc<dyn NotificationListener>) {
        self.listener = listener;
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn is_remote(&self) -> bool {
        self.http.is_some()
    }

    /// 实体存储：已配置远程时为远程适配器，否则为新的本地默认存储
    pub fn store<T: Entity>(&self) -> Arc<dyn EntityStore<T>> {
        match (&self.config.remote, &self.http) {
            (Some(remote), Some(http)) => Arc::new(RemoteStore::<T>::new(http.clone(), Some(remote))),
            _ => Arc::new(DefaultStore::<T>::new()),
        }
    }

    pub fn syncer<T: Entity>(&self) -> EntitySyncer<T> {
        EntitySyncer::with_listener(self.store::<T>(), self.session.clone(), self.listener.clone())
    }

    /// 一次页面访问
    pub fn page<T: Entity>(&self) -> AdminPage<T> {
        AdminPage::new(self.syncer::<T>())
    }

    pub async fn whatsapp_link(&self) -> String {
        let store = self.store::<WhatsAppSetting>();
        whatsapp::resolve_link(store.as_ref()).await
    }

    pub async fn dashboard(&self) -> DashboardStats {
        load_stats(self).await
    }
}

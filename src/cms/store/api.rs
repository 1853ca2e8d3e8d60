//! 远程行存储适配器（Supabase REST / PostgREST）
//!
//! 每个实体一张表，四个动词：
//! - `GET    /rest/v1/<table>?select=<fields>&order=<key>.asc`
//! - `POST   /rest/v1/<table>`                       插入（请求体不带 id）
//! - `POST   /rest/v1/<table>?on_conflict=id`        按主键 upsert
//! - `DELETE /rest/v1/<table>?id=eq.<id>`

use super::{EntityStore, StoreMode};
use crate::cms::entities::{select_clause, sort_rows, Entity};
use crate::cms::types::{handle_http_response, StoreResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::{debug, info};
use uuid::Uuid;

pub const ENV_SUPABASE_URL: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";

/// 远程服务连接配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// 项目地址，例如 `https://xyz.supabase.co`
    pub url: String,
    pub anon_key: String,
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// 从环境变量读取；任一变量缺失或为空即视为"未配置"
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_SUPABASE_URL).ok()?;
        let key = std::env::var(ENV_SUPABASE_ANON_KEY).ok()?;
        Self::from_parts(Some(url), Some(key))
    }

    pub fn from_parts(url: Option<String>, anon_key: Option<String>) -> Option<Self> {
        let url = url.filter(|u| !u.trim().is_empty())?;
        let key = anon_key.filter(|k| !k.trim().is_empty())?;
        Some(Self::new(url.trim(), key.trim()))
    }

    /// 创建带认证头的 HTTP 客户端（apikey / Authorization 通过 default_headers 自动添加）
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::HeaderName::from_static("apikey"),
            reqwest::header::HeaderValue::from_str(&self.anon_key).context("无效的 anon key")?,
        );
        headers.insert(
            reqwest::header::AUTHORIZATION,
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", self.anon_key))
                .context("无效的 anon key")?,
        );
        reqwest::ClientBuilder::new()
            .default_headers(headers)
            .build()
            .context("创建 HTTP 客户端失败")
    }
}

/// 单个实体表的远程适配器
///
/// `rest_base` 为 `None` 表示未配置：读写都返回空集合，不发任何请求。
pub struct RemoteStore<T> {
    client: reqwest::Client,
    rest_base: Option<String>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> RemoteStore<T> {
    pub fn new(client: reqwest::Client, config: Option<&RemoteConfig>) -> Self {
        Self {
            client,
            rest_base: config.map(|c| format!("{}/rest/v1", c.url)),
            _entity: PhantomData,
        }
    }

    /// 按配置创建（内部创建 HTTP 客户端）
    pub fn from_config(config: &RemoteConfig) -> Result<Self> {
        Ok(Self::new(config.http_client()?, Some(config)))
    }

    /// 未配置的适配器
    pub fn unconfigured() -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_base: None,
            _entity: PhantomData,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.rest_base.is_some()
    }

    fn table_url(&self) -> Option<String> {
        self.rest_base
            .as_ref()
            .map(|base| format!("{}/{}", base, T::TABLE))
    }
}

#[async_trait]
impl<T: Entity> EntityStore<T> for RemoteStore<T> {
    fn mode(&self) -> StoreMode {
        if self.is_configured() {
            StoreMode::Remote
        } else {
            StoreMode::LocalDefault
        }
    }

    async fn list(&self) -> StoreResult<Vec<T>> {
        let Some(url) = self.table_url() else {
            debug!("[RemoteStore:{}] 未配置远程服务，返回空集合", T::NAME);
            return Ok(Vec::new());
        };
        let request_id = Uuid::new_v4().to_string();
        let select = select_clause::<T>();
        let order = format!("{}.asc", T::ORDER_BY);

        info!("[RemoteStore:{}] 📡 查询全部行", T::NAME);
        debug!(
            "[RemoteStore:{}]   请求URL: {}, select={}, order={}, 请求ID: {}",
            T::NAME,
            url,
            select,
            order,
            request_id
        );

        let response = self
            .client
            .get(&url)
            .query(&[("select", select.as_str()), ("order", order.as_str())])
            .header("X-Request-Id", &request_id)
            .send()
            .await?;

        let mut rows: Vec<T> = handle_http_response(response, "查询").await?;
        // 服务端已排序；这里保证次序与本地默认模式一致
        sort_rows(&mut rows);
        info!("[RemoteStore:{}] ✅ 查询完成，{} 行", T::NAME, rows.len());
        Ok(rows)
    }

    async fn upsert(&self, record: &T) -> StoreResult<Vec<T>> {
        let Some(url) = self.table_url() else {
            debug!("[RemoteStore:{}] 未配置远程服务，忽略写入", T::NAME);
            return Ok(Vec::new());
        };
        let request_id = Uuid::new_v4().to_string();

        let request = match record.id() {
            None => {
                info!("[RemoteStore:{}] 📡 插入新行", T::NAME);
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
            }
            Some(id) => {
                info!("[RemoteStore:{}] 📡 按主键 upsert, id={}", T::NAME, id);
                self.client
                    .post(&url)
                    .query(&[("on_conflict", "id")])
                    .header("Prefer", "resolution=merge-duplicates,return=representation")
            }
        };
        debug!("[RemoteStore:{}]   请求ID: {}", T::NAME, request_id);

        let response = request
            .header("X-Request-Id", &request_id)
            .json(record)
            .send()
            .await?;

        let rows: Vec<T> = handle_http_response(response, "写入").await?;
        info!(
            "[RemoteStore:{}] ✅ 写入完成，返回 {} 行",
            T::NAME,
            rows.len()
        );
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> StoreResult<Vec<T>> {
        let Some(url) = self.table_url() else {
            debug!("[RemoteStore:{}] 未配置远程服务，忽略删除", T::NAME);
            return Ok(Vec::new());
        };
        let request_id = Uuid::new_v4().to_string();
        info!("[RemoteStore:{}] 📡 删除 id={}", T::NAME, id);

        let response = self
            .client
            .delete(&url)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .header("X-Request-Id", &request_id)
            .send()
            .await?;

        let rows: Vec<T> = handle_http_response(response, "删除").await?;
        if rows.is_empty() {
            debug!("[RemoteStore:{}] id={} 不存在，未删除任何行", T::NAME, id);
        }
        Ok(rows)
    }
}

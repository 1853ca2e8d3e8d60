use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, error, info};

/// 远程存储适配器的错误类型
///
/// "未配置远程服务" 不是错误：适配器在该状态下返回空集合。
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("服务器错误 {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("反序列化响应失败: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// 用户提示中展示的描述（服务端 message 原样透出）
    pub fn description(&self) -> String {
        match self {
            StoreError::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// PostgREST 错误响应体
///
/// 例如 `{"code":"23505","message":"duplicate key ...","details":null,"hint":null}`
#[derive(Debug, Default, Deserialize)]
pub struct PostgrestError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl PostgrestError {
    /// 合并 message / details / hint 为一条可读消息
    pub fn summary(&self) -> String {
        let mut out = self.message.clone();
        if let Some(details) = self.details.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(" (");
            out.push_str(details);
            out.push(')');
        }
        if let Some(hint) = self.hint.as_deref().filter(|h| !h.is_empty()) {
            out.push_str(" 提示: ");
            out.push_str(hint);
        }
        out
    }
}

/// 通用 HTTP 响应处理：检查状态码，失败时解析 PostgREST 错误体，成功时反序列化为行集合
///
/// 所有表的 list / upsert / delete 共用此方法
pub async fn handle_http_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    operation_name: &str,
) -> StoreResult<Vec<T>> {
    let status = response.status();

    // body 只能读取一次
    let body_bytes = response.bytes().await?;
    let body_str = String::from_utf8_lossy(&body_bytes);
    debug!("[HTTP] {}响应 Body: {}", operation_name, body_str);

    if !status.is_success() {
        error!(
            "[HTTP] {}请求失败，HTTP状态: {}, 响应: {}",
            operation_name, status, body_str
        );
        let message = serde_json::from_slice::<PostgrestError>(&body_bytes)
            .map(|e| e.summary())
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| body_str.to_string());
        return Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        });
    }

    // DELETE 未命中或 204 时 body 为空，视为空集合
    if body_bytes.iter().all(u8::is_ascii_whitespace) {
        info!("[HTTP] {}请求成功，响应为空", operation_name);
        return Ok(Vec::new());
    }

    let rows: Vec<T> = serde_json::from_slice(&body_bytes).map_err(|e| {
        error!(
            "[HTTP] {}反序列化失败: {:?}\n原始响应: {}",
            operation_name, e, body_str
        );
        StoreError::Decode(e)
    })?;

    debug!("[HTTP] {}请求成功，返回 {} 行", operation_name, rows.len());
    Ok(rows)
}

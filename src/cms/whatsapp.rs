//! WhatsApp 聊天深链：`https://wa.me/<digits>?text=<percent-encoded>`

use crate::cms::entities::WhatsAppSetting;
use crate::cms::store::EntityStore;
use tracing::warn;

pub const FALLBACK_PHONE: &str = "6285646420488";
pub const FALLBACK_MESSAGE: &str = "Halo, saya tertarik dengan jasa foto dan video Anda";

/// 只保留数字；本地格式的前导 0 换成国家码 62
pub fn normalize_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("62{}", rest),
        None => digits,
    }
}

pub fn chat_link(phone: &str, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        normalize_phone(phone),
        urlencoding::encode(message)
    )
}

/// 由设置行生成链接；号码或消息为空时用内置值
pub fn link_for(setting: Option<&WhatsAppSetting>) -> String {
    let phone = setting
        .map(|s| normalize_phone(&s.phone))
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| FALLBACK_PHONE.to_string());
    let message = setting
        .map(|s| s.default_message.trim())
        .filter(|m| !m.is_empty())
        .unwrap_or(FALLBACK_MESSAGE);
    chat_link(&phone, message)
}

/// 读取第一条 WhatsApp 设置生成链接；读取失败时退回内置值
pub async fn resolve_link(store: &dyn EntityStore<WhatsAppSetting>) -> String {
    match store.list().await {
        Ok(rows) => link_for(rows.first()),
        Err(e) => {
            warn!("[WhatsApp] 读取设置失败，使用内置号码: {}", e);
            link_for(None)
        }
    }
}

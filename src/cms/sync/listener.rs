//! 通知回调接口

use async_trait::async_trait;

/// 用户可见的临时通知（toast）与集合变更回调
#[async_trait]
pub trait NotificationListener: Send + Sync {
    /// 一次性提示：标题 + 可选描述（通常是服务端错误信息）
    async fn on_toast(&self, title: String, description: Option<String>);

    /// 某实体的集合被重新解析，参数为 JSON 数组字符串
    async fn on_collection_changed(&self, entity: String, rows_json: String);
}

/// 默认空实现（无操作）
pub struct EmptyNotificationListener;

#[async_trait]
impl NotificationListener for EmptyNotificationListener {
    async fn on_toast(&self, _title: String, _description: Option<String>) {
        // 默认不做任何处理
    }

    async fn on_collection_changed(&self, _entity: String, _rows_json: String) {
        // 默认不做任何处理
    }
}

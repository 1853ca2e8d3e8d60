//! 会话相关常量与模型

/// 登录标记的键
pub const AUTH_KEY: &str = "vs_admin_auth";
/// 登录标记的值
pub const AUTH_VALUE: &str = "1";
/// 已初始化标记的值
pub const SEEDED_VALUE: &str = "true";

/// 实体的"已写入示例数据"标记键：`seeded_<entity>`
pub fn seeded_key(entity: &str) -> String {
    format!("seeded_{}", entity)
}

/// 管理员账号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            email: "admin@visualstoryteller.app".to_string(),
            password: "admin123".to_string(),
        }
    }
}

impl AdminCredentials {
    /// 精确匹配（区分大小写，不去空白）
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

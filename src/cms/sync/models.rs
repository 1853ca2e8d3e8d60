//! 同步器状态与通知文案

/// 单次页面访问内的同步状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// 尚未加载，或首次加载失败
    Unresolved,
    /// 数据来自远程存储
    RemoteSourced,
    /// 使用内置默认数据，修改只在会话内有效
    LocalDefault,
    /// 写入进行中
    Mutating,
}

/// 保存 / 删除的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// 已写入并重新拉取；编辑界面可以关闭
    Applied,
    /// 存储拒绝；集合保持原值，编辑界面保持打开
    Rejected,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

pub const TOAST_SAVED: &str = "Tersimpan";
pub const TOAST_SAVE_FAILED: &str = "Gagal menyimpan";
pub const TOAST_DELETED: &str = "Terhapus";
pub const TOAST_DELETE_FAILED: &str = "Gagal menghapus";
pub const TOAST_SEEDED: &str = "Data contoh ditambahkan";
pub const TOAST_SEED_FAILED: &str = "Gagal menambahkan";
pub const TOAST_LOAD_FAILED: &str = "Gagal memuat";

//! 删除确认对话框：删除永远是两步操作

use tracing::debug;

pub const DEFAULT_CONFIRM_TITLE: &str = "Hapus item?";

pub struct ConfirmDialog<T> {
    title: String,
    pending: Option<T>,
}

impl<T> Default for ConfirmDialog<T> {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRM_TITLE)
    }
}

impl<T> ConfirmDialog<T> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            pending: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    /// 用户点击删除：只打开对话框，不做任何破坏性操作
    pub fn request(&mut self, row: T) {
        debug!("[ConfirmDialog] 等待用户确认删除");
        self.pending = Some(row);
    }

    /// 用户确认：取出待删除行并关闭对话框
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    /// 用户取消
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

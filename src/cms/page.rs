//! 管理端实体页面：把同步器、数据表、表单弹窗、删除确认组合在一起
//!
//! 视图组件不知道自己展示的是哪种实体，实体信息全部来自 `Entity` 的列 / 字段描述。

use crate::cms::entities::Entity;
use crate::cms::sync::{EntitySyncer, MutationOutcome};
use crate::cms::view::{ConfirmDialog, DataTable, FormModal, TablePage};
use tracing::{debug, warn};

pub struct AdminPage<T: Entity> {
    syncer: EntitySyncer<T>,
    table: DataTable<T>,
    form: FormModal<T>,
    confirm: ConfirmDialog<T>,
}

impl<T: Entity> AdminPage<T> {
    pub fn new(syncer: EntitySyncer<T>) -> Self {
        let mut table = DataTable::new(T::columns());
        if let Some(filter) = T::category_filter() {
            table = table.with_filter(filter);
        }
        Self {
            syncer,
            table,
            form: FormModal::new(T::fields()),
            confirm: ConfirmDialog::default(),
        }
    }

    pub fn title(&self) -> &'static str {
        T::LABEL
    }

    /// 页面挂载：解析数据来源
    pub async fn load(&mut self) {
        self.syncer.load().await;
        self.refresh_filter();
    }

    pub fn items(&self) -> &[T] {
        self.syncer.items()
    }

    pub fn syncer(&self) -> &EntitySyncer<T> {
        &self.syncer
    }

    pub fn table(&self) -> &DataTable<T> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut DataTable<T> {
        &mut self.table
    }

    pub fn form(&self) -> &FormModal<T> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormModal<T> {
        &mut self.form
    }

    pub fn confirm(&self) -> &ConfirmDialog<T> {
        &self.confirm
    }

    pub fn find(&self, id: i64) -> Option<&T> {
        self.items().iter().find(|r| r.id() == Some(id))
    }

    /// 草稿主键已在集合中时为编辑，否则为新增
    pub fn form_title(&self, draft: &T) -> String {
        let exists = draft
            .id()
            .is_some_and(|id| self.items().iter().any(|r| r.id() == Some(id)));
        if exists {
            format!("Edit {}", T::LABEL)
        } else {
            format!("Tambah {}", T::LABEL)
        }
    }

    /// 新增：打开空白草稿
    pub fn on_add(&mut self) {
        let draft = self.syncer.new_draft();
        let title = self.form_title(&draft);
        self.form.open(title, draft);
    }

    /// 编辑：打开该行的副本
    pub fn on_edit(&mut self, row: &T) {
        let title = self.form_title(row);
        self.form.open(title, row.clone());
    }

    /// 按主键打开编辑；主键不存在时返回 false
    pub fn on_edit_id(&mut self, id: i64) -> bool {
        match self.find(id).cloned() {
            Some(row) => {
                self.on_edit(&row);
                true
            }
            None => false,
        }
    }

    /// 删除：只打开确认框
    pub fn on_delete(&mut self, row: &T) {
        self.confirm.request(row.clone());
    }

    /// 提交表单；成功后关闭弹窗，失败时弹窗保持打开
    pub async fn submit(&mut self) -> Option<MutationOutcome> {
        let draft = self.form.submit()?;
        let outcome = self.syncer.save(&draft).await;
        if outcome.is_applied() {
            self.form.close();
            self.refresh_filter();
        }
        Some(outcome)
    }

    pub fn cancel_form(&mut self) {
        self.form.close();
    }

    /// 用户确认删除；失败时确认框重新打开
    pub async fn confirm_delete(&mut self) -> Option<MutationOutcome> {
        let row = self.confirm.confirm()?;
        let Some(id) = row.id() else {
            warn!("[AdminPage:{}] 待删除行没有主键，忽略", T::NAME);
            return None;
        };
        let outcome = self.syncer.delete(id).await;
        if outcome.is_applied() {
            self.refresh_filter();
        } else {
            self.confirm.request(row);
        }
        Some(outcome)
    }

    pub fn cancel_delete(&mut self) {
        debug!("[AdminPage:{}] 取消删除", T::NAME);
        self.confirm.cancel();
    }

    /// 手动写入示例数据
    pub async fn seed_examples(&mut self) -> MutationOutcome {
        let outcome = self.syncer.seed_examples().await;
        self.refresh_filter();
        outcome
    }

    /// 当前页视图
    pub fn view(&mut self) -> TablePage<'_, T> {
        self.table.view(self.syncer.items())
    }

    /// 当前页的终端表格文本
    pub fn render(&mut self) -> String {
        self.table.render_text(self.syncer.items(), T::id)
    }

    fn refresh_filter(&mut self) {
        self.table.refresh_filter_options(self.syncer.items());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::entities::{Portfolio, Pricing};
    use crate::cms::store::DefaultStore;
    use crate::cms::testing::{init_test_logger, memory_session, FakeRemote};
    use crate::cms::view::FieldInput;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    fn local_page<T: Entity>() -> AdminPage<T> {
        AdminPage::new(EntitySyncer::new(
            Arc::new(DefaultStore::<T>::new()),
            memory_session(),
        ))
    }

    #[tokio::test]
    async fn bronze_package_lands_on_last_page() {
        init_test_logger();
        let mut page: AdminPage<Pricing> = local_page();
        page.load().await;
        let before = page.items().len();

        page.on_add();
        assert_eq!(page.form().title(), "Tambah Pricing");
        page.form_mut().apply_raw("name", "Bronze").unwrap();
        page.form_mut().apply_raw("price", "1000000").unwrap();
        page.form_mut()
            .apply("features", FieldInput::Items(vec!["1 sesi".to_string()]))
            .unwrap();

        assert_eq!(page.submit().await, Some(MutationOutcome::Applied));
        assert!(!page.form().is_open());
        assert_eq!(page.items().len(), before + 1);

        page.table_mut().go_to(usize::MAX);
        let view = page.view();
        let last = view.rows.last().unwrap();
        assert_eq!(view.page, view.total_pages);
        assert_eq!(last.name, "Bronze");
        assert_eq!(last.price, 1_000_000);
        assert_eq!(last.features, vec!["1 sesi".to_string()]);
    }

    #[tokio::test]
    async fn delete_without_confirmation_issues_no_store_call() {
        init_test_logger();
        let remote = Arc::new(FakeRemote::with_rows(Pricing::defaults()));
        let mut page: AdminPage<Pricing> =
            AdminPage::new(EntitySyncer::new(remote.clone(), memory_session()));
        page.load().await;

        let row = page.items()[0].clone();
        page.on_delete(&row);
        assert!(page.confirm().is_open());
        page.cancel_delete();
        assert_eq!(page.confirm_delete().await, None);

        assert_eq!(remote.deletes.load(Ordering::SeqCst), 0);
        assert_eq!(page.items().len(), 3);

        page.on_delete(&row);
        assert_eq!(page.confirm_delete().await, Some(MutationOutcome::Applied));
        assert_eq!(remote.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(page.items().len(), 2);
    }

    #[tokio::test]
    async fn rejected_save_keeps_form_open() {
        init_test_logger();
        let remote = Arc::new(FakeRemote::with_rows(Pricing::defaults()));
        let mut page: AdminPage<Pricing> =
            AdminPage::new(EntitySyncer::new(remote.clone(), memory_session()));
        page.load().await;

        assert!(page.on_edit_id(2));
        assert_eq!(page.form().title(), "Edit Pricing");
        remote.fail_writes.store(true, Ordering::SeqCst);
        assert_eq!(page.submit().await, Some(MutationOutcome::Rejected));
        assert!(page.form().is_open());

        page.cancel_form();
        assert_eq!(page.submit().await, None);
        assert!(!page.on_edit_id(42));
    }

    #[tokio::test]
    async fn portfolio_filter_tracks_current_categories() {
        init_test_logger();
        let mut page: AdminPage<Portfolio> = local_page();
        page.load().await;
        let options = page.table().filter().map(|f| f.options.clone()).unwrap();
        assert_eq!(options, vec!["Wedding", "Event", "Corporate", "Personal"]);

        page.table_mut().set_filter_value(Some("Personal".to_string()));
        assert_eq!(page.view().total, 2);

        // 删除唯一的 Event 作品后选项随之更新
        let event = page.find(2).cloned().unwrap();
        page.on_delete(&event);
        page.confirm_delete().await;
        let options = page.table().filter().map(|f| f.options.clone()).unwrap();
        assert!(!options.contains(&"Event".to_string()));
    }
}

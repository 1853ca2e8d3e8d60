//! 通用视图组件：数据表、表单弹窗、删除确认
//!
//! 这些组件与实体无关，实体相关的信息只来自列描述和字段描述。

pub mod confirm;
pub mod form;
pub mod table;

pub use confirm::ConfirmDialog;
pub use form::{Accessor, Field, FieldInput, FieldKind, FormError, FormModal};
pub use table::{join_items, CategoryFilter, Column, DataTable, TablePage, ALL_OPTION, PAGE_SIZE};

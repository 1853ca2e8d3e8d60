//! 工作室网站内容管理核心
//!
//! 每种内容实体都走同一套 CRUD 同步流程：
//! 页面（表格 / 表单 / 删除确认）→ 同步器（决定数据来源、写入后全量重新拉取）→ 存储（远程或本地默认）。

pub mod client;
pub mod dashboard;
pub mod db;
pub mod entities;
pub mod page;
pub mod session;
pub mod store;
pub mod sync;
pub mod types;
pub mod view;
pub mod whatsapp;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ClientConfig, CmsClient};
pub use page::AdminPage;

//! 站点内容实体
//!
//! 每种实体对应远程一张表：扁平记录，数值主键由服务端生成（本地默认模式下用毫秒时间戳代替）。
//! 实体在这里声明表名、投影字段、排序字段、内置默认数据以及列/字段描述。

pub mod about;
pub mod cta;
pub mod footer;
pub mod hero;
pub mod navbar;
pub mod portfolio;
pub mod pricing;
pub mod process;
pub mod services;
pub mod testimonials;
pub mod whatsapp;

use crate::cms::view::{CategoryFilter, Column, Field};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

pub use about::About;
pub use cta::Cta;
pub use footer::Footer;
pub use hero::Hero;
pub use navbar::Navbar;
pub use portfolio::Portfolio;
pub use pricing::Pricing;
pub use process::ProcessStep;
pub use services::Service;
pub use testimonials::Testimonial;
pub use whatsapp::WhatsAppSetting;

/// 可被管理后台增删改查的内容实体
pub trait Entity:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 实体名，用于日志和 `seeded_<name>` 标记
    const NAME: &'static str;
    /// 远程表名
    const TABLE: &'static str;
    /// 后台页面标题
    const LABEL: &'static str;
    /// 除主键外的投影字段
    const FIELDS: &'static [&'static str];
    /// 读取时的排序字段
    const ORDER_BY: &'static str = "id";

    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: Option<i64>);

    /// 排序值，默认按主键；没有主键的行排在最后
    fn order_value(&self) -> i64 {
        self.id().unwrap_or(i64::MAX)
    }

    /// 新建草稿：所有字段为空值 / 零值，不带主键
    fn blank() -> Self;

    /// 内置默认数据（主键 1..n）
    fn defaults() -> Vec<Self>;

    fn columns() -> Vec<Column<Self>>;

    fn fields() -> Vec<Field<Self>>;

    /// 数据表的分类过滤器（大多数实体没有）
    fn category_filter() -> Option<CategoryFilter<Self>> {
        None
    }
}

/// `select=` 投影参数：`id,<fields...>`
pub fn select_clause<T: Entity>() -> String {
    std::iter::once("id")
        .chain(T::FIELDS.iter().copied())
        .collect::<Vec<_>>()
        .join(",")
}

/// 按读取契约排序：排序值优先，其次主键
pub fn sort_rows<T: Entity>(rows: &mut [T]) {
    rows.sort_by_key(|r| (r.order_value(), r.id().unwrap_or(i64::MAX)));
}

/// 去掉主键，用于把默认数据作为新行插入
pub fn without_id<T: Entity>(mut row: T) -> T {
    row.set_id(None);
    row
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_entity<T: Entity>() {
        let defaults = T::defaults();
        assert!(!defaults.is_empty(), "{} 缺少默认数据", T::NAME);
        for (i, row) in defaults.iter().enumerate() {
            assert_eq!(row.id(), Some(i as i64 + 1), "{} 默认主键应为 1..n", T::NAME);
        }
        assert_eq!(T::blank().id(), None);

        // 字段描述只引用投影中存在的属性
        for field in T::fields() {
            assert!(
                T::FIELDS.contains(&field.name),
                "{} 的字段 {} 不在投影中",
                T::NAME,
                field.name
            );
        }
        for column in T::columns() {
            assert!(T::FIELDS.contains(&column.key));
        }

        // 序列化：无主键时不输出 id，投影字段全部输出
        let value = serde_json::to_value(without_id(defaults[0].clone())).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        for f in T::FIELDS {
            assert!(obj.contains_key(*f), "{} 序列化缺少 {}", T::NAME, f);
        }
    }

    #[test]
    fn every_entity_is_consistent() {
        check_entity::<Navbar>();
        check_entity::<Hero>();
        check_entity::<About>();
        check_entity::<Service>();
        check_entity::<Portfolio>();
        check_entity::<ProcessStep>();
        check_entity::<Pricing>();
        check_entity::<Testimonial>();
        check_entity::<Cta>();
        check_entity::<Footer>();
        check_entity::<WhatsAppSetting>();
    }

    #[test]
    fn select_clause_starts_with_id() {
        assert_eq!(select_clause::<Pricing>(), "id,name,price,features");
        assert_eq!(
            select_clause::<ProcessStep>(),
            "id,step_number,title,description"
        );
    }

    #[test]
    fn process_steps_sort_by_step_number() {
        let mut rows = ProcessStep::defaults();
        rows.reverse();
        rows[0].step_number = 0;
        sort_rows(&mut rows);
        assert_eq!(rows[0].title, "Delivery");
        assert_eq!(rows[1].title, "Konsultasi");
    }
}

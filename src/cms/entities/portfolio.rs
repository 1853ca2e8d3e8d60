//! 作品集

use super::Entity;
use crate::cms::view::{CategoryFilter, Column, Field};
use serde::{Deserialize, Serialize};

/// 前台作品集的固定分类
pub const CATEGORIES: &[&str] = &["Wedding", "Event", "Corporate", "Personal"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub link: String,
}

impl Portfolio {
    fn item(id: i64, title: &str, image: &str, category: &str) -> Self {
        Self {
            id: Some(id),
            title: title.to_string(),
            image: image.to_string(),
            category: category.to_string(),
            link: "#".to_string(),
        }
    }
}

impl Entity for Portfolio {
    const NAME: &'static str = "portfolio";
    const TABLE: &'static str = "portfolio";
    const LABEL: &'static str = "Portfolio";
    const FIELDS: &'static [&'static str] = &["title", "image", "category", "link"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            title: String::new(),
            image: String::new(),
            category: String::new(),
            link: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::item(1, "Wedding Golden Hour", "/src/assets/portfolio-wedding.jpg", "Wedding"),
            Self::item(2, "Corporate Event Stage", "/src/assets/portfolio-event.jpg", "Event"),
            Self::item(3, "Professional Portrait", "/src/assets/portfolio-corporate.jpg", "Corporate"),
            Self::item(4, "Graduation Day", "/src/assets/portfolio-wisuda.jpg", "Personal"),
            Self::item(5, "Creative Branding", "/src/assets/portfolio-personal.jpg", "Personal"),
            Self::item(6, "Product Photography", "/src/assets/portfolio-product.jpg", "Corporate"),
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Judul", |r: &Self| r.title.clone()),
            Column::new("category", "Kategori", |r: &Self| r.category.clone()),
            Column::new("link", "Link", |r: &Self| r.link.clone()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("title", "Judul", |r: &Self| r.title.clone(), |r: &mut Self, v| r.title = v),
            Field::image("image", "Gambar", |r: &Self| r.image.clone(), |r: &mut Self, v| r.image = v),
            Field::select(
                "category",
                "Kategori",
                CATEGORIES,
                |r: &Self| r.category.clone(),
                |r: &mut Self, v| r.category = v,
            ),
            Field::text("link", "Link", |r: &Self| r.link.clone(), |r: &mut Self, v| r.link = v),
        ]
    }

    fn category_filter() -> Option<CategoryFilter<Self>> {
        Some(CategoryFilter::new("category", |r: &Self| r.category.clone()))
    }
}

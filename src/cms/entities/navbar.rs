//! 导航栏

use super::{strings, Entity};
use crate::cms::view::{join_items, Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Navbar {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub logo_url: String,
    /// 菜单项，顺序即展示顺序
    #[serde(default)]
    pub menu: Vec<String>,
}

impl Entity for Navbar {
    const NAME: &'static str = "navbar";
    const TABLE: &'static str = "navbar";
    const LABEL: &'static str = "Navbar";
    const FIELDS: &'static [&'static str] = &["logo_url", "menu"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            logo_url: String::new(),
            menu: Vec::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            logo_url: String::new(),
            menu: strings(&[
                "Beranda",
                "Tentang",
                "Layanan",
                "Portofolio",
                "Harga",
                "Testimoni",
                "Kontak",
            ]),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("logo_url", "Logo", |r: &Self| r.logo_url.clone()),
            Column::new("menu", "Menu", |r: &Self| join_items(&r.menu)),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text(
                "logo_url",
                "Logo URL",
                |r: &Self| r.logo_url.clone(),
                |r: &mut Self, v| r.logo_url = v,
            ),
            Field::array("menu", "Menu", |r: &Self| r.menu.clone(), |r: &mut Self, v| r.menu = v),
        ]
    }
}

//! 页脚联系方式

use super::{strings, Entity};
use crate::cms::view::{join_items, Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub address: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub social_links: Vec<String>,
}

impl Entity for Footer {
    const NAME: &'static str = "footer";
    const TABLE: &'static str = "footer";
    const LABEL: &'static str = "Footer";
    const FIELDS: &'static [&'static str] = &["address", "email", "phone", "social_links"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            address: String::new(),
            email: String::new(),
            phone: String::new(),
            social_links: Vec::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            address: "Jl. Kreatif No. 10, Jakarta Selatan".to_string(),
            email: "admin@visualstoryteller.app".to_string(),
            phone: "+62 856-4642-0488".to_string(),
            social_links: strings(&["@visual.studio"]),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("address", "Alamat", |r: &Self| r.address.clone()),
            Column::new("email", "Email", |r: &Self| r.email.clone()),
            Column::new("phone", "Telepon", |r: &Self| r.phone.clone()),
            Column::new("social_links", "Social", |r: &Self| join_items(&r.social_links)),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text(
                "address",
                "Alamat",
                |r: &Self| r.address.clone(),
                |r: &mut Self, v| r.address = v,
            ),
            Field::text("email", "Email", |r: &Self| r.email.clone(), |r: &mut Self, v| r.email = v),
            Field::text("phone", "Telepon", |r: &Self| r.phone.clone(), |r: &mut Self, v| r.phone = v),
            Field::array(
                "social_links",
                "Social Links",
                |r: &Self| r.social_links.clone(),
                |r: &mut Self, v| r.social_links = v,
            ),
        ]
    }
}

use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

/// "关于我们" 区块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Entity for About {
    const NAME: &'static str = "about";
    const TABLE: &'static str = "about";
    const LABEL: &'static str = "About";
    const FIELDS: &'static [&'static str] = &["title", "description", "image"];

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
            description: String::new(),
            image: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            title: "Kenapa Memilih Kami?".to_string(),
            description:
                "Tim profesional, peralatan modern, editing cinematic, tepat waktu, dan harga transparan."
                    .to_string(),
            image: String::new(),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Judul", |r: &Self| r.title.clone()),
            Column::new("description", "Deskripsi", |r: &Self| r.description.clone()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("title", "Judul", |r: &Self| r.title.clone(), |r: &mut Self, v| r.title = v),
            Field::textarea(
                "description",
                "Deskripsi",
                |r: &Self| r.description.clone(),
                |r: &mut Self, v| r.description = v,
            ),
            Field::image("image", "Gambar", |r: &Self| r.image.clone(), |r: &mut Self, v| r.image = v),
        ]
    }
}

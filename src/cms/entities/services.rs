use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

/// 服务项目，`icon` 为前台图标名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

impl Service {
    fn sample(id: i64, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: Some(id),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }
}

impl Entity for Service {
    const NAME: &'static str = "services";
    const TABLE: &'static str = "services";
    const LABEL: &'static str = "Service";
    const FIELDS: &'static [&'static str] = &["name", "description", "icon"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            icon: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::sample(
                1,
                "Photography",
                "Wedding, Wisuda, Event, Produk, Company Profile",
                "Camera",
            ),
            Self::sample(
                2,
                "Videography",
                "Wedding Cinematic, Event Highlight, Company Profile Video, Konten Sosial Media, Reels & TikTok",
                "Video",
            ),
            Self::sample(
                3,
                "Editing Service",
                "Editing Video Mentah, Color Grading Cinematic, Retouching Foto, Short Video Ads, Motion Graphic",
                "Scissors",
            ),
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Nama", |r: &Self| r.name.clone()),
            Column::new("description", "Deskripsi", |r: &Self| r.description.clone()),
            Column::new("icon", "Icon", |r: &Self| r.icon.clone()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("name", "Nama", |r: &Self| r.name.clone(), |r: &mut Self, v| r.name = v),
            Field::textarea(
                "description",
                "Deskripsi",
                |r: &Self| r.description.clone(),
                |r: &mut Self, v| r.description = v,
            ),
            Field::text("icon", "Icon", |r: &Self| r.icon.clone(), |r: &mut Self, v| r.icon = v),
        ]
    }
}

//! 首屏横幅

use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: String,
    #[serde(default)]
    pub background_image: String,
    pub cta_text: String,
}

impl Entity for Hero {
    const NAME: &'static str = "hero";
    const TABLE: &'static str = "hero";
    const LABEL: &'static str = "Hero";
    const FIELDS: &'static [&'static str] = &["title", "subtitle", "background_image", "cta_text"];

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
            subtitle: String::new(),
            background_image: String::new(),
            cta_text: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            title: "Abadikan Momen, Ceritakan Kisahmu Dengan Visual Berkualitas".to_string(),
            subtitle: "Kami membantu Anda mengubah momen menjadi karya visual yang berkelas dan tak terlupakan."
                .to_string(),
            background_image: "/src/assets/hero-bg.jpg".to_string(),
            cta_text: "BOOKING SEKARANG".to_string(),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Judul", |r: &Self| r.title.clone()),
            Column::new("subtitle", "Subjudul", |r: &Self| r.subtitle.clone()),
            Column::new("cta_text", "CTA", |r: &Self| r.cta_text.clone()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("title", "Judul", |r: &Self| r.title.clone(), |r: &mut Self, v| r.title = v),
            Field::textarea(
                "subtitle",
                "Subjudul",
                |r: &Self| r.subtitle.clone(),
                |r: &mut Self, v| r.subtitle = v,
            ),
            Field::image(
                "background_image",
                "Background",
                |r: &Self| r.background_image.clone(),
                |r: &mut Self, v| r.background_image = v,
            ),
            Field::text(
                "cta_text",
                "CTA Text",
                |r: &Self| r.cta_text.clone(),
                |r: &mut Self, v| r.cta_text = v,
            ),
        ]
    }
}

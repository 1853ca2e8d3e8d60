use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

/// 行动号召区块
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: String,
    pub button_text: String,
}

impl Entity for Cta {
    const NAME: &'static str = "cta";
    const TABLE: &'static str = "cta";
    const LABEL: &'static str = "CTA";
    const FIELDS: &'static [&'static str] = &["title", "subtitle", "button_text"];

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
            button_text: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            title: "Siap Membuat Momen Anda Jadi Lebih Berarti?".to_string(),
            subtitle: "Hubungi kami sekarang untuk konsultasi gratis dan dapatkan penawaran terbaik untuk kebutuhan visual Anda."
                .to_string(),
            button_text: "BOOKING SEKARANG VIA WHATSAPP".to_string(),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("title", "Judul", |r: &Self| r.title.clone()),
            Column::new("subtitle", "Subjudul", |r: &Self| r.subtitle.clone()),
            Column::new("button_text", "Tombol", |r: &Self| r.button_text.clone()),
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
            Field::text(
                "button_text",
                "Teks Tombol",
                |r: &Self| r.button_text.clone(),
                |r: &mut Self, v| r.button_text = v,
            ),
        ]
    }
}

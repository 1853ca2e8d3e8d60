//! 客户评价

use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub client_name: String,
    #[serde(default)]
    pub photo: String,
    pub message: String,
    /// 0..=5
    pub rating: i32,
}

impl Testimonial {
    fn sample(id: i64, client_name: &str, message: &str) -> Self {
        Self {
            id: Some(id),
            client_name: client_name.to_string(),
            photo: String::new(),
            message: message.to_string(),
            rating: 5,
        }
    }
}

impl Entity for Testimonial {
    const NAME: &'static str = "testimonials";
    const TABLE: &'static str = "testimonials";
    const LABEL: &'static str = "Testimonial";
    const FIELDS: &'static [&'static str] = &["client_name", "photo", "message", "rating"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            client_name: String::new(),
            photo: String::new(),
            message: String::new(),
            rating: 0,
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::sample(
                1,
                "Sarah & Andi",
                "Hasil video wedding kami luar biasa! Tim sangat profesional dan hasilnya melebihi ekspektasi. Setiap momen terabadikan dengan sempurna.",
            ),
            Self::sample(
                2,
                "Budi Santoso",
                "Company profile video yang dihasilkan sangat berkualitas. Editing cinematic-nya membuat brand kami terlihat premium dan profesional.",
            ),
            Self::sample(
                3,
                "Anisa Putri",
                "Foto wisuda saya jadi kenangan terbaik! Fotografernya sangat sabar dan kreatif dalam mengarahkan pose. Hasilnya amazing!",
            ),
            Self::sample(
                4,
                "PT. Maju Bersama",
                "Sudah 3 kali menggunakan jasa mereka untuk event perusahaan. Selalu puas dengan hasilnya. Highly recommended!",
            ),
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("client_name", "Klien", |r: &Self| r.client_name.clone()),
            Column::new("message", "Pesan", |r: &Self| r.message.clone()),
            Column::new("rating", "Rating", |r: &Self| r.rating.to_string()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text(
                "client_name",
                "Nama Klien",
                |r: &Self| r.client_name.clone(),
                |r: &mut Self, v| r.client_name = v,
            ),
            Field::image("photo", "Foto", |r: &Self| r.photo.clone(), |r: &mut Self, v| r.photo = v),
            Field::textarea(
                "message",
                "Pesan",
                |r: &Self| r.message.clone(),
                |r: &mut Self, v| r.message = v,
            ),
            Field::rating("rating", "Rating", |r: &Self| r.rating, |r: &mut Self, v| r.rating = v),
        ]
    }
}

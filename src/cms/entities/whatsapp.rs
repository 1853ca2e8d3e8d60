//! WhatsApp 设置（号码 + 默认消息）

use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppSetting {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub phone: String,
    pub default_message: String,
}

impl Entity for WhatsAppSetting {
    const NAME: &'static str = "whatsapp";
    const TABLE: &'static str = "whatsapp_settings";
    const LABEL: &'static str = "WhatsApp Settings";
    const FIELDS: &'static [&'static str] = &["phone", "default_message"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn blank() -> Self {
        Self {
            id: None,
            phone: String::new(),
            default_message: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![Self {
            id: Some(1),
            phone: "+62 856-4642-0488".to_string(),
            default_message: "Halo, saya tertarik dengan jasa foto dan video Anda".to_string(),
        }]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("phone", "Nomor", |r: &Self| r.phone.clone()),
            Column::new("default_message", "Pesan Default", |r: &Self| {
                r.default_message.clone()
            }),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("phone", "Nomor", |r: &Self| r.phone.clone(), |r: &mut Self, v| r.phone = v),
            Field::textarea(
                "default_message",
                "Pesan Default",
                |r: &Self| r.default_message.clone(),
                |r: &mut Self, v| r.default_message = v,
            ),
        ]
    }
}

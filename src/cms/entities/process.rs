//! 服务流程步骤（按步骤号排序）

use super::Entity;
use crate::cms::view::{Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub step_number: i64,
    pub title: String,
    pub description: String,
}

impl ProcessStep {
    fn step(n: i64, title: &str, description: &str) -> Self {
        Self {
            id: Some(n),
            step_number: n,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

impl Entity for ProcessStep {
    const NAME: &'static str = "process";
    const TABLE: &'static str = "process";
    const LABEL: &'static str = "Process";
    const FIELDS: &'static [&'static str] = &["step_number", "title", "description"];
    const ORDER_BY: &'static str = "step_number";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn order_value(&self) -> i64 {
        self.step_number
    }

    fn blank() -> Self {
        Self {
            id: None,
            step_number: 0,
            title: String::new(),
            description: String::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self::step(1, "Konsultasi", "Diskusi kebutuhan & konsep visual Anda"),
            Self::step(2, "Konsep & Brief", "Menyusun konsep kreatif & timeline"),
            Self::step(3, "Shooting", "Eksekusi sesi foto & video profesional"),
            Self::step(4, "Editing", "Post-production & color grading cinematic"),
            Self::step(5, "Delivery", "Pengiriman hasil final sesuai jadwal"),
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("step_number", "Step", |r: &Self| r.step_number.to_string()),
            Column::new("title", "Judul", |r: &Self| r.title.clone()),
            Column::new("description", "Deskripsi", |r: &Self| r.description.clone()),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::number(
                "step_number",
                "Step",
                |r: &Self| r.step_number,
                |r: &mut Self, v| r.step_number = v,
            ),
            Field::text("title", "Judul", |r: &Self| r.title.clone(), |r: &mut Self, v| r.title = v),
            Field::textarea(
                "description",
                "Deskripsi",
                |r: &Self| r.description.clone(),
                |r: &mut Self, v| r.description = v,
            ),
        ]
    }
}

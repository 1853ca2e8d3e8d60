//! 价格套餐

use super::{strings, Entity};
use crate::cms::view::{join_items, Column, Field};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    /// 价格（印尼盾）
    pub price: i64,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Entity for Pricing {
    const NAME: &'static str = "pricing";
    const TABLE: &'static str = "pricing";
    const LABEL: &'static str = "Pricing";
    const FIELDS: &'static [&'static str] = &["name", "price", "features"];

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
            price: 0,
            features: Vec::new(),
        }
    }

    fn defaults() -> Vec<Self> {
        vec![
            Self {
                id: Some(1),
                name: "Silver".to_string(),
                price: 1_500_000,
                features: strings(&[
                    "1 Fotografer",
                    "3 Jam Sesi",
                    "50 Foto Edit",
                    "File Digital HD",
                    "Delivery 5 Hari",
                ]),
            },
            Self {
                id: Some(2),
                name: "Gold".to_string(),
                price: 3_500_000,
                features: strings(&[
                    "1 Foto + 1 Videografer",
                    "5 Jam Sesi",
                    "1 Video Highlight",
                    "100 Foto Edit",
                    "File Digital HD",
                    "Delivery 7 Hari",
                ]),
            },
            Self {
                id: Some(3),
                name: "Platinum".to_string(),
                price: 7_500_000,
                features: strings(&[
                    "Full Team",
                    "8 Jam Sesi",
                    "Cinematic Video",
                    "Drone Coverage",
                    "Unlimited Foto Edit",
                    "File 4K",
                    "Delivery 14 Hari",
                ]),
            },
        ]
    }

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("name", "Nama", |r: &Self| r.name.clone()),
            Column::new("price", "Harga", |r: &Self| format_rupiah(r.price)),
            Column::new("features", "Fitur", |r: &Self| join_items(&r.features)),
        ]
    }

    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::text("name", "Nama", |r: &Self| r.name.clone(), |r: &mut Self, v| r.name = v),
            Field::number("price", "Harga", |r: &Self| r.price, |r: &mut Self, v| r.price = v),
            Field::array(
                "features",
                "Fitur",
                |r: &Self| r.features.clone(),
                |r: &mut Self, v| r.features = v,
            ),
        ]
    }
}

/// 按印尼习惯格式化价格：`1500000` -> `Rp 1.500.000`
pub fn format_rupiah(price: i64) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if price < 0 {
        format!("Rp -{}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rupiah_groups_thousands_with_dots() {
        assert_eq!(format_rupiah(1_500_000), "Rp 1.500.000");
        assert_eq!(format_rupiah(999), "Rp 999");
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(-25_000), "Rp -25.000");
    }

    #[test]
    fn row_without_features_deserializes() {
        let row: Pricing =
            serde_json::from_str(r#"{"id":9,"name":"Bronze","price":1000000,"features":[]}"#)
                .unwrap();
        assert_eq!(row.id, Some(9));
        assert!(row.features.is_empty());
    }
}

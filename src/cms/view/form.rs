//! 通用表单弹窗
//!
//! 字段描述是带类型的标签联合：每种输入控件携带对应类型的读写函数，
//! 字段与属性类型是否匹配在编译期就能检查。弹窗只修改草稿副本，
//! 只有显式提交时才把草稿交回同步器。

use base64::Engine;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// 评分上限
pub const MAX_RATING: i32 = 5;

/// 某个属性的读写函数
pub struct Accessor<T, V> {
    pub get: fn(&T) -> V,
    pub set: fn(&mut T, V),
}

impl<T, V> Clone for Accessor<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Accessor<T, V> {}

/// 字段类型（每种对应一种输入控件）
pub enum FieldKind<T> {
    Text(Accessor<T, String>),
    TextArea(Accessor<T, String>),
    Number(Accessor<T, i64>),
    Image(Accessor<T, String>),
    ArrayOfString(Accessor<T, Vec<String>>),
    Rating(Accessor<T, i32>),
    Select {
        access: Accessor<T, String>,
        options: Vec<String>,
    },
}

impl<T> FieldKind<T> {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text(_) => "text",
            FieldKind::TextArea(_) => "textarea",
            FieldKind::Number(_) => "number",
            FieldKind::Image(_) => "image",
            FieldKind::ArrayOfString(_) => "array",
            FieldKind::Rating(_) => "rating",
            FieldKind::Select { .. } => "select",
        }
    }
}

/// 表单字段描述
pub struct Field<T> {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind<T>,
}

impl<T> Field<T> {
    pub fn text(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text(Accessor { get, set }),
        }
    }

    pub fn textarea(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::TextArea(Accessor { get, set }),
        }
    }

    pub fn number(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> i64,
        set: fn(&mut T, i64),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number(Accessor { get, set }),
        }
    }

    pub fn image(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Image(Accessor { get, set }),
        }
    }

    pub fn array(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> Vec<String>,
        set: fn(&mut T, Vec<String>),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::ArrayOfString(Accessor { get, set }),
        }
    }

    pub fn rating(
        name: &'static str,
        label: &'static str,
        get: fn(&T) -> i32,
        set: fn(&mut T, i32),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Rating(Accessor { get, set }),
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        options: &[&str],
        get: fn(&T) -> String,
        set: fn(&mut T, String),
    ) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Select {
                access: Accessor { get, set },
                options: options.iter().map(|o| o.to_string()).collect(),
            },
        }
    }

    /// 当前草稿中该字段的展示文本
    pub fn display(&self, draft: &T) -> String {
        match &self.kind {
            FieldKind::Text(a) | FieldKind::TextArea(a) | FieldKind::Image(a) => (a.get)(draft),
            FieldKind::Select { access, .. } => (access.get)(draft),
            FieldKind::Number(a) => (a.get)(draft).to_string(),
            FieldKind::ArrayOfString(a) => (a.get)(draft).join(", "),
            FieldKind::Rating(a) => {
                let n = (a.get)(draft).clamp(0, MAX_RATING) as usize;
                format!("{}{}", "★".repeat(n), "☆".repeat(MAX_RATING as usize - n))
            }
        }
    }
}

/// 表单输入
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// 文本、多行文本、图片地址
    Text(String),
    /// 数字输入框的原始文本，提交前做类型转换
    Number(String),
    /// 数组字段整体替换
    Items(Vec<String>),
    Rating(i32),
    /// 下拉选项
    Choice(String),
}

#[derive(Error, Debug)]
pub enum FormError {
    #[error("表单未打开")]
    NotOpen,

    #[error("未知字段: {0}")]
    UnknownField(String),

    #[error("字段 {field} 是 {expected} 类型")]
    KindMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("字段 {field} 不支持选项 {value}")]
    UnknownOption { field: String, value: String },

    #[error("字段 {field} 没有第 {index} 项")]
    ItemOutOfRange { field: String, index: usize },

    #[error("读取图片失败: {0}")]
    Image(#[from] std::io::Error),
}

/// 数字输入的类型转换：无法解析时为 0，小数向零取整
pub fn coerce_number(raw: &str) -> i64 {
    let raw = raw.trim();
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
        })
        .unwrap_or(0)
}

/// 把本地图片读成 `data:` URL
pub fn image_data_url(path: &Path) -> Result<String, std::io::Error> {
    let bytes = std::fs::read(path)?;
    let mime = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    };
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", mime, encoded))
}

/// 通用表单弹窗
pub struct FormModal<T> {
    fields: Vec<Field<T>>,
    title: String,
    draft: Option<T>,
}

impl<T: Clone> FormModal<T> {
    pub fn new(fields: Vec<Field<T>>) -> Self {
        Self {
            fields,
            title: String::new(),
            draft: None,
        }
    }

    pub fn fields(&self) -> &[Field<T>] {
        &self.fields
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&T> {
        self.draft.as_ref()
    }

    /// 打开弹窗，编辑传入的副本
    pub fn open(&mut self, title: impl Into<String>, draft: T) {
        self.title = title.into();
        debug!("[FormModal] 打开表单: {}", self.title);
        self.draft = Some(draft);
    }

    /// 关闭弹窗，丢弃草稿
    pub fn close(&mut self) {
        self.draft = None;
    }

    /// 提交：返回草稿副本，弹窗保持打开，由调用方在保存成功后关闭
    pub fn submit(&self) -> Option<T> {
        self.draft.clone()
    }

    fn field(&self, name: &str) -> Result<&Field<T>, FormError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// 按字段名应用一次输入
    pub fn apply(&mut self, name: &str, input: FieldInput) -> Result<(), FormError> {
        // 直接借用两个字段，避免整体借用 self
        let field = self
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let draft = self.draft.as_mut().ok_or(FormError::NotOpen)?;
        let mismatch = || FormError::KindMismatch {
            field: field.name.to_string(),
            expected: field.kind.type_name(),
        };

        match (&field.kind, input) {
            (FieldKind::Text(a), FieldInput::Text(v))
            | (FieldKind::TextArea(a), FieldInput::Text(v))
            | (FieldKind::Image(a), FieldInput::Text(v)) => (a.set)(draft, v),
            (FieldKind::Number(a), FieldInput::Number(raw)) => (a.set)(draft, coerce_number(&raw)),
            (FieldKind::ArrayOfString(a), FieldInput::Items(items)) => (a.set)(draft, items),
            (FieldKind::Rating(a), FieldInput::Rating(n)) => (a.set)(draft, n.clamp(0, MAX_RATING)),
            (FieldKind::Select { access, options }, FieldInput::Choice(v)) => {
                if !options.contains(&v) {
                    return Err(FormError::UnknownOption {
                        field: field.name.to_string(),
                        value: v,
                    });
                }
                (access.set)(draft, v)
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// 命令行输入：按字段类型把原始文本转换为输入
    ///
    /// 数组字段用 `|` 分隔各项。
    pub fn apply_raw(&mut self, name: &str, raw: &str) -> Result<(), FormError> {
        let input = match &self.field(name)?.kind {
            FieldKind::Text(_) | FieldKind::TextArea(_) | FieldKind::Image(_) => {
                FieldInput::Text(raw.to_string())
            }
            FieldKind::Number(_) => FieldInput::Number(raw.to_string()),
            FieldKind::ArrayOfString(_) => FieldInput::Items(if raw.trim().is_empty() {
                Vec::new()
            } else {
                raw.split('|').map(|s| s.trim().to_string()).collect()
            }),
            FieldKind::Rating(_) => FieldInput::Rating(coerce_number(raw).clamp(0, MAX_RATING as i64) as i32),
            FieldKind::Select { .. } => FieldInput::Choice(raw.to_string()),
        };
        self.apply(name, input)
    }

    /// 图片字段：从本地文件读取为 data URL
    pub fn attach_image(&mut self, name: &str, path: &Path) -> Result<(), FormError> {
        if !matches!(self.field(name)?.kind, FieldKind::Image(_)) {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: "image",
            });
        }
        let url = image_data_url(path)?;
        self.apply(name, FieldInput::Text(url))
    }

    fn items_of(&self, name: &str) -> Result<(Accessor<T, Vec<String>>, Vec<String>), FormError> {
        let field = self.field(name)?;
        let FieldKind::ArrayOfString(access) = &field.kind else {
            return Err(FormError::KindMismatch {
                field: name.to_string(),
                expected: field.kind.type_name(),
            });
        };
        let draft = self.draft.as_ref().ok_or(FormError::NotOpen)?;
        Ok((*access, (access.get)(draft)))
    }

    fn store_items(
        &mut self,
        access: Accessor<T, Vec<String>>,
        items: Vec<String>,
    ) -> Result<(), FormError> {
        let draft = self.draft.as_mut().ok_or(FormError::NotOpen)?;
        (access.set)(draft, items);
        Ok(())
    }

    /// 数组字段末尾追加一项
    pub fn push_item(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let (access, mut items) = self.items_of(name)?;
        items.push(value.into());
        self.store_items(access, items)
    }

    /// 修改数组字段的第 index 项
    pub fn update_item(
        &mut self,
        name: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let (access, mut items) = self.items_of(name)?;
        let slot = items.get_mut(index).ok_or_else(|| FormError::ItemOutOfRange {
            field: name.to_string(),
            index,
        })?;
        *slot = value.into();
        self.store_items(access, items)
    }

    /// 删除数组字段的第 index 项，其余项保持原顺序
    pub fn remove_item(&mut self, name: &str, index: usize) -> Result<(), FormError> {
        let (access, mut items) = self.items_of(name)?;
        if index >= items.len() {
            return Err(FormError::ItemOutOfRange {
                field: name.to_string(),
                index,
            });
        }
        items.remove(index);
        self.store_items(access, items)
    }

    /// 当前草稿的 (标题, 展示值) 列表
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        match &self.draft {
            Some(draft) => self
                .fields
                .iter()
                .map(|f| (f.label, f.display(draft)))
                .collect(),
            None => Vec::new(),
        }
    }
}

//! 通用数据表：全文过滤、分类过滤、固定分页
//!
//! 表格本身不知道正在展示哪种实体，实体相关的信息全部来自列描述。

use tracing::debug;

/// 每页行数
pub const PAGE_SIZE: usize = 10;

/// 分类过滤器中表示"不过滤"的选项
pub const ALL_OPTION: &str = "All";

/// 列描述：属性名、显示标题、单元格渲染函数
pub struct Column<T> {
    pub key: &'static str,
    pub label: &'static str,
    render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, label: &'static str, render: fn(&T) -> String) -> Self {
        Self { key, label, render }
    }

    /// 渲染单元格文本
    pub fn value(&self, row: &T) -> String {
        (self.render)(row)
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label,
            render: self.render,
        }
    }
}

/// 数组属性的默认渲染方式
pub fn join_items(items: &[String]) -> String {
    items.join(", ")
}

/// 单属性分类过滤器
pub struct CategoryFilter<T> {
    pub key: &'static str,
    value: fn(&T) -> String,
    pub options: Vec<String>,
}

impl<T> CategoryFilter<T> {
    pub fn new(key: &'static str, value: fn(&T) -> String) -> Self {
        Self {
            key,
            value,
            options: Vec::new(),
        }
    }

    /// 用当前集合中出现过的非空取值刷新选项（保持首次出现的顺序）
    pub fn refresh_options(&mut self, rows: &[T]) {
        let mut options: Vec<String> = Vec::new();
        for row in rows {
            let v = (self.value)(row);
            if !v.is_empty() && !options.contains(&v) {
                options.push(v);
            }
        }
        self.options = options;
    }

    fn matches(&self, row: &T, selected: &str) -> bool {
        (self.value)(row) == selected
    }
}

/// 某一页的视图
#[derive(Debug)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    /// 当前页（从 1 开始）
    pub page: usize,
    pub total_pages: usize,
    /// 过滤后的总行数
    pub total: usize,
}

/// 通用数据表状态
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    filter: Option<CategoryFilter<T>>,
    query: String,
    filter_value: Option<String>,
    page: usize,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            filter: None,
            query: String::new(),
            filter_value: None,
            page: 1,
        }
    }

    pub fn with_filter(mut self, filter: CategoryFilter<T>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn filter(&self) -> Option<&CategoryFilter<T>> {
        self.filter.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// 设置全文搜索关键字
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// 选择分类；`None` 或 "All" 表示不过滤。没有配置分类过滤器时忽略。
    pub fn set_filter_value(&mut self, value: Option<String>) {
        if self.filter.is_none() {
            debug!("[DataTable] 未配置分类过滤器，忽略分类选择");
            return;
        }
        self.filter_value = value.filter(|v| v != ALL_OPTION);
    }

    pub fn filter_value(&self) -> Option<&str> {
        self.filter_value.as_deref()
    }

    /// 集合变化后刷新分类选项
    pub fn refresh_filter_options(&mut self, rows: &[T]) {
        if let Some(filter) = self.filter.as_mut() {
            filter.refresh_options(rows);
        }
    }

    /// 请求跳转页码，实际页码在渲染时按过滤结果夹紧
    pub fn go_to(&mut self, page: usize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// 全文过滤（所有展示列，大小写不敏感的子串匹配）与分类过滤取交集
    pub fn filtered<'a>(&self, rows: &'a [T]) -> Vec<&'a T> {
        let needle = self.query.to_lowercase();
        rows.iter()
            .filter(|row| {
                needle.is_empty()
                    || self
                        .columns
                        .iter()
                        .any(|c| c.value(row).to_lowercase().contains(&needle))
            })
            .filter(|row| match (&self.filter, &self.filter_value) {
                (Some(filter), Some(selected)) => filter.matches(row, selected),
                _ => true,
            })
            .collect()
    }

    /// 过滤后的页数：`ceil(n / PAGE_SIZE)`
    pub fn page_count(&self, rows: &[T]) -> usize {
        self.filtered(rows).len().div_ceil(PAGE_SIZE)
    }

    /// 计算当前页视图；页码夹紧到 `[1, max(1, 页数)]` 并写回状态
    pub fn view<'a>(&mut self, rows: &'a [T]) -> TablePage<'a, T> {
        let filtered = self.filtered(rows);
        let total = filtered.len();
        let total_pages = total.div_ceil(PAGE_SIZE).max(1);
        self.page = self.page.clamp(1, total_pages);

        let rows = filtered
            .into_iter()
            .skip((self.page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .collect();

        TablePage {
            rows,
            page: self.page,
            total_pages,
            total,
        }
    }

    /// 渲染为终端表格文本（超长单元格截断）
    pub fn render_text(&mut self, rows: &[T], id_of: fn(&T) -> Option<i64>) -> String {
        const MAX_CELL: usize = 40;

        let page = self.view(rows);
        let mut header: Vec<String> = vec!["ID".to_string()];
        header.extend(self.columns.iter().map(|c| c.label.to_string()));

        let body: Vec<Vec<String>> = page
            .rows
            .iter()
            .map(|row| {
                let mut cells = vec![id_of(row).map(|id| id.to_string()).unwrap_or_default()];
                cells.extend(
                    self.columns
                        .iter()
                        .map(|c| truncate_cell(&c.value(row), MAX_CELL)),
                );
                cells
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
        for cells in &body {
            for (i, cell) in cells.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        out.push_str(&format_line(&header, &widths));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for cells in &body {
            out.push_str(&format_line(cells, &widths));
            out.push('\n');
        }
        out.push_str(&format!(
            "{} / {}  (共 {} 条)",
            page.page, page.total_pages, page.total
        ));
        out
    }
}

fn truncate_cell(value: &str, max: usize) -> String {
    let flat = value.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let mut cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

//! 工作室内容管理 CLI
//!
//! 终端版管理后台：登录后按实体列出、过滤、分页、新增、编辑、删除、写入示例数据。
//! 设置 `SUPABASE_URL` / `SUPABASE_ANON_KEY` 后操作远程数据，否则使用内置默认数据（仅本次运行有效）。

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use studio_cms_core_rust::cms::db::sqlite_url;
use studio_cms_core_rust::cms::entities::{
    About, Cta, Footer, Hero, Navbar, Portfolio, Pricing, ProcessStep, Service, Testimonial,
    WhatsAppSetting,
};
use studio_cms_core_rust::cms::view::ALL_OPTION;
use studio_cms_core_rust::{
    AdminPage, ClientConfig, CmsClient, Entity, MutationOutcome, NotificationListener,
    RemoteConfig,
};
use tracing::{debug, info};

/// 工作室内容管理 CLI
#[derive(Parser, Debug)]
#[command(name = "studio-cli")]
#[command(about = "工作室网站内容管理 CLI", long_about = None)]
struct Args {
    /// 本地标志位数据库（登录标记、示例数据标记）
    #[arg(long, default_value = "studio_admin.db")]
    db: String,

    /// 远程服务地址，覆盖 SUPABASE_URL
    #[arg(long)]
    supabase_url: Option<String>,

    /// 远程服务 anon key，覆盖 SUPABASE_ANON_KEY
    #[arg(long)]
    anon_key: Option<String>,

    /// 日志级别（默认: warn,studio_cms_core_rust=info）
    #[arg(long, default_value = "warn,studio_cms_core_rust=info")]
    log_level: String,

    /// 同时把日志写入该文件
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 管理员登录
    Login { email: String, password: String },
    /// 登出（清除登录标记）
    Logout,
    /// 首页统计
    Dashboard,
    /// 输出 WhatsApp 聊天链接
    WhatsappLink,
    /// 列出实体（支持搜索、分类过滤、分页）
    List {
        entity: EntityKind,
        /// 全文搜索（不区分大小写）
        #[arg(short, long)]
        query: Option<String>,
        /// 分类过滤（仅作品集），"All" 表示不过滤
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// 查看一行的全部字段
    Show { entity: EntityKind, id: i64 },
    /// 新增一行
    Add {
        entity: EntityKind,
        /// 字段赋值 `name=value`，数组字段用 `|` 分隔
        #[arg(short, long = "set")]
        set: Vec<String>,
        /// 图片字段从本地文件读取 `name=path`
        #[arg(long)]
        image: Vec<String>,
    },
    /// 编辑一行
    Edit {
        entity: EntityKind,
        id: i64,
        #[arg(short, long = "set")]
        set: Vec<String>,
        #[arg(long)]
        image: Vec<String>,
    },
    /// 删除一行（需要确认）
    Delete {
        entity: EntityKind,
        id: i64,
        /// 跳过确认
        #[arg(short, long)]
        yes: bool,
    },
    /// 写入示例数据（仅远程模式）
    Seed { entity: EntityKind },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum EntityKind {
    Navbar,
    Hero,
    About,
    Services,
    Portfolio,
    Process,
    Pricing,
    Testimonials,
    Cta,
    Footer,
    Whatsapp,
}

impl Command {
    fn entity(&self) -> Option<EntityKind> {
        match self {
            Command::List { entity, .. }
            | Command::Show { entity, .. }
            | Command::Add { entity, .. }
            | Command::Edit { entity, .. }
            | Command::Delete { entity, .. }
            | Command::Seed { entity } => Some(*entity),
            _ => None,
        }
    }
}

/// 初始化日志（stdout，可选同时写入文件）
fn init_logger(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    use std::fs::OpenOptions;
    use std::io;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    // 优先使用环境变量 RUST_LOG（如果设置了），否则使用命令行参数
    let filter_layer =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_ansi(true);

    // 文件不需要颜色
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(format!("无法创建日志文件 {}", path.display()))?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(file)
                    .with_file(true)
                    .with_line_number(true)
                    .with_target(false)
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    if let Some(path) = log_file {
        info!("[CLI] 📝 日志同时写入文件: {}", path.display());
    }
    Ok(())
}

/// 把通知直接打印到终端
struct CliNotificationListener;

#[async_trait::async_trait]
impl NotificationListener for CliNotificationListener {
    async fn on_toast(&self, title: String, description: Option<String>) {
        match description {
            Some(description) => println!("» {}: {}", title, description),
            None => println!("» {}", title),
        }
    }

    async fn on_collection_changed(&self, entity: String, rows_json: String) {
        debug!("[CLI] {} 集合更新: {}", entity, rows_json);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level, args.log_file.as_deref())?;

    let remote = match (&args.supabase_url, &args.anon_key) {
        (None, None) => RemoteConfig::from_env(),
        (url, key) => RemoteConfig::from_parts(
            url.clone()
                .or_else(|| std::env::var("SUPABASE_URL").ok()),
            key.clone()
                .or_else(|| std::env::var("SUPABASE_ANON_KEY").ok()),
        ),
    };
    let mut config = ClientConfig::new(remote);
    config.flag_db_url = sqlite_url(&args.db);

    let mut client = CmsClient::new(config).await?;
    client.set_notification_listener(Arc::new(CliNotificationListener));
    if !client.is_remote() {
        info!("[CLI] 未配置远程服务，修改只在本次运行内有效");
    }

    match args.command {
        Command::Login { email, password } => {
            if client.session().login(&email, &password).await? {
                println!("Berhasil login");
            } else {
                bail!("Login gagal: Email atau password salah");
            }
        }
        Command::Logout => {
            client.session().logout().await?;
            println!("已登出");
        }
        Command::Dashboard => {
            client.session().require_auth()?;
            for (title, value) in client.dashboard().await.cards() {
                println!("{:<20} {}", title, value);
            }
        }
        Command::WhatsappLink => println!("{}", client.whatsapp_link().await),
        command => {
            client.session().require_auth()?;
            if let Some(kind) = command.entity() {
                dispatch(&client, kind, command).await?;
            }
        }
    }
    Ok(())
}

async fn dispatch(client: &CmsClient, kind: EntityKind, command: Command) -> Result<()> {
    match kind {
        EntityKind::Navbar => run_entity::<Navbar>(client, command).await,
        EntityKind::Hero => run_entity::<Hero>(client, command).await,
        EntityKind::About => run_entity::<About>(client, command).await,
        EntityKind::Services => run_entity::<Service>(client, command).await,
        EntityKind::Portfolio => run_entity::<Portfolio>(client, command).await,
        EntityKind::Process => run_entity::<ProcessStep>(client, command).await,
        EntityKind::Pricing => run_entity::<Pricing>(client, command).await,
        EntityKind::Testimonials => run_entity::<Testimonial>(client, command).await,
        EntityKind::Cta => run_entity::<Cta>(client, command).await,
        EntityKind::Footer => run_entity::<Footer>(client, command).await,
        EntityKind::Whatsapp => run_entity::<WhatsAppSetting>(client, command).await,
    }
}

async fn run_entity<T: Entity>(client: &CmsClient, command: Command) -> Result<()> {
    let mut page = client.page::<T>();
    page.load().await;

    match command {
        Command::List {
            query,
            category,
            page: page_no,
            ..
        } => {
            let table = page.table_mut();
            if let Some(query) = query {
                table.set_query(query);
            }
            table.set_filter_value(category);
            table.go_to(page_no);
            println!("== {} ==", page.title());
            if let Some(filter) = page.table().filter() {
                println!("Kategori: {} | {}", ALL_OPTION, filter.options.join(" | "));
            }
            println!("{}", page.render());
        }
        Command::Show { id, .. } => {
            if !page.on_edit_id(id) {
                bail!("{} 不存在 id={}", T::LABEL, id);
            }
            print_draft(&page);
            page.cancel_form();
        }
        Command::Add { set, image, .. } => {
            page.on_add();
            apply_inputs(&mut page, &set, &image)?;
            submit(&mut page).await?;
        }
        Command::Edit { id, set, image, .. } => {
            if !page.on_edit_id(id) {
                bail!("{} 不存在 id={}", T::LABEL, id);
            }
            apply_inputs(&mut page, &set, &image)?;
            submit(&mut page).await?;
        }
        Command::Delete { id, yes, .. } => {
            let row = page
                .find(id)
                .cloned()
                .with_context(|| format!("{} 不存在 id={}", T::LABEL, id))?;
            page.on_delete(&row);
            if yes || ask_confirm(page.confirm().title())? {
                if page.confirm_delete().await == Some(MutationOutcome::Rejected) {
                    bail!("删除失败");
                }
            } else {
                page.cancel_delete();
                println!("已取消");
            }
        }
        Command::Seed { .. } => {
            if !client.is_remote() {
                bail!("未配置远程服务，无法写入示例数据");
            }
            if !page.seed_examples().await.is_applied() {
                bail!("写入示例数据失败");
            }
            println!("{}", page.render());
        }
        Command::Login { .. } | Command::Logout | Command::Dashboard | Command::WhatsappLink => {
            unreachable!("非实体命令")
        }
    }
    Ok(())
}

/// 依次应用 `--set name=value` 与 `--image name=path`
fn apply_inputs<T: Entity>(page: &mut AdminPage<T>, set: &[String], image: &[String]) -> Result<()> {
    for assignment in set {
        let (name, value) = split_assignment(assignment)?;
        page.form_mut()
            .apply_raw(name, value)
            .context(format!("字段赋值失败: {}", assignment))?;
    }
    for assignment in image {
        let (name, path) = split_assignment(assignment)?;
        page.form_mut()
            .attach_image(name, Path::new(path))
            .context(format!("读取图片失败: {}", assignment))?;
    }
    Ok(())
}

fn split_assignment(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .with_context(|| format!("参数格式应为 name=value: {}", raw))
}

async fn submit<T: Entity>(page: &mut AdminPage<T>) -> Result<()> {
    let title = page.form().title().to_string();
    print_draft(page);
    match page.submit().await {
        Some(MutationOutcome::Applied) => {
            info!("[CLI] {} 已提交", title);
            Ok(())
        }
        Some(MutationOutcome::Rejected) => bail!("{} 保存失败", title),
        None => bail!("表单未打开"),
    }
}

fn print_draft<T: Entity>(page: &AdminPage<T>) {
    println!("== {} ==", page.form().title());
    for (label, value) in page.form().describe() {
        println!("{:<16} {}", label, value);
    }
}

fn ask_confirm(title: &str) -> Result<bool> {
    print!("{} [y/N] ", title);
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("读取确认输入失败")?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

//! 远程存储适配器与同步器的集成测试
//!
//! 用 axum 起一个最小的 PostgREST 替身：`/rest/v1/:table` 上的 select / insert / upsert / delete。

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};
use studio_cms_core_rust::cms::entities::{Pricing, ProcessStep, Testimonial};
use studio_cms_core_rust::{
    ClientConfig, CmsClient, Entity, EntityStore, RemoteConfig, RemoteStore, StoreError,
    SyncState,
};

static INIT_LOGGER: Once = Once::new();

fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        use tracing_subscriber::prelude::*;
        use tracing_subscriber::EnvFilter;

        let filter_layer = EnvFilter::new("info,studio_cms_core_rust=debug");
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_test_writer();

        tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer)
            .init();
    });
}

#[derive(Debug, Clone)]
struct RecordedRequest {
    method: &'static str,
    table: String,
    query: HashMap<String, String>,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    request_id: Option<String>,
}

#[derive(Default)]
struct Tables {
    rows: HashMap<String, Vec<Value>>,
    next_id: HashMap<String, i64>,
    rejected: HashSet<String>,
    requests: Vec<RecordedRequest>,
}

#[derive(Clone, Default)]
struct FakePostgrest {
    inner: Arc<Mutex<Tables>>,
}

impl FakePostgrest {
    fn record(&self, method: &'static str, table: &str, query: &HashMap<String, String>, headers: &HeaderMap) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.inner.lock().unwrap().requests.push(RecordedRequest {
            method,
            table: table.to_string(),
            query: query.clone(),
            apikey: header("apikey"),
            authorization: header("authorization"),
            prefer: header("prefer"),
            request_id: header("x-request-id"),
        });
    }

    fn reject(&self, table: &str) {
        self.inner.lock().unwrap().rejected.insert(table.to_string());
    }

    fn clear(&self, table: &str) {
        self.inner.lock().unwrap().rows.remove(table);
    }

    fn row_count(&self, table: &str) -> usize {
        self.inner
            .lock()
            .unwrap()
            .rows
            .get(table)
            .map_or(0, Vec::len)
    }

    fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    fn insert_count(&self, table: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == "POST" && r.table == table)
            .count()
    }
}

fn row_id(row: &Value) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

async fn list_rows(
    State(db): State<FakePostgrest>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    db.record("GET", &table, &query, &headers);
    let mut rows = db
        .inner
        .lock()
        .unwrap()
        .rows
        .get(&table)
        .cloned()
        .unwrap_or_default();
    if let Some(order) = query.get("order") {
        let key = order.trim_end_matches(".asc").to_string();
        rows.sort_by_key(|r| r.get(&key).and_then(Value::as_i64).unwrap_or(i64::MAX));
    }
    Json(rows).into_response()
}

async fn write_row(
    State(db): State<FakePostgrest>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(mut body): Json<Value>,
) -> Response {
    db.record("POST", &table, &query, &headers);
    let mut tables = db.inner.lock().unwrap();
    if tables.rejected.contains(&table) {
        return (
            StatusCode::CONFLICT,
            Json(json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint",
                "details": "Key (id)=(1) already exists.",
                "hint": null
            })),
        )
            .into_response();
    }

    let upsert = query.get("on_conflict").map(String::as_str) == Some("id");
    let id = match row_id(&body).filter(|_| upsert) {
        Some(id) => id,
        None => {
            let next = tables.next_id.entry(table.clone()).or_insert(1);
            let id = *next;
            *next += 1;
            id
        }
    };
    body["id"] = json!(id);

    let rows = tables.rows.entry(table).or_default();
    match rows.iter_mut().find(|r| row_id(r) == Some(id)) {
        Some(existing) => *existing = body.clone(),
        None => rows.push(body.clone()),
    }
    (StatusCode::CREATED, Json(vec![body])).into_response()
}

async fn delete_rows(
    State(db): State<FakePostgrest>,
    Path(table): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    db.record("DELETE", &table, &query, &headers);
    let id = query
        .get("id")
        .and_then(|v| v.strip_prefix("eq."))
        .and_then(|v| v.parse::<i64>().ok());
    let mut tables = db.inner.lock().unwrap();
    let rows = tables.rows.entry(table).or_default();
    let (removed, kept): (Vec<Value>, Vec<Value>) =
        rows.drain(..).partition(|r| id.is_some() && row_id(r) == id);
    *rows = kept;
    Json(removed).into_response()
}

async fn spawn_fake_postgrest() -> (RemoteConfig, FakePostgrest) {
    let db = FakePostgrest::default();
    let app = Router::new()
        .route(
            "/rest/v1/:table",
            get(list_rows).post(write_row).delete(delete_rows),
        )
        .with_state(db.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (RemoteConfig::new(format!("http://{}", addr), "anon-test-key"), db)
}

fn bronze() -> Pricing {
    let mut row = Pricing::blank();
    row.name = "Bronze".to_string();
    row.price = 1_000_000;
    row.features = vec!["1 sesi".to_string()];
    row
}

#[tokio::test]
async fn insert_then_update_by_identity() {
    init_test_logger();
    let (config, db) = spawn_fake_postgrest().await;
    let store: RemoteStore<Pricing> = RemoteStore::from_config(&config).unwrap();

    let inserted = store.upsert(&bronze()).await.unwrap();
    assert_eq!(inserted.len(), 1);
    let mut row = inserted[0].clone();
    assert_eq!(row.id, Some(1));
    assert_eq!(db.row_count("pricing"), 1);

    row.features.push("10 foto edit".to_string());
    row.price = 1_250_000;
    let updated = store.upsert(&row).await.unwrap();
    assert_eq!(updated, vec![row.clone()]);
    assert_eq!(db.row_count("pricing"), 1);

    let listed = store.list().await.unwrap();
    assert_eq!(listed, vec![row]);
    assert_eq!(
        listed[0].features,
        vec!["1 sesi".to_string(), "10 foto edit".to_string()]
    );

    let requests = db.requests();
    assert_eq!(requests[0].query.get("on_conflict"), None);
    assert_eq!(requests[0].prefer.as_deref(), Some("return=representation"));
    assert_eq!(requests[1].query.get("on_conflict").map(String::as_str), Some("id"));
    assert_eq!(
        requests[1].prefer.as_deref(),
        Some("resolution=merge-duplicates,return=representation")
    );
}

#[tokio::test]
async fn every_request_is_authenticated_and_tagged() {
    init_test_logger();
    let (config, db) = spawn_fake_postgrest().await;
    let store: RemoteStore<ProcessStep> = RemoteStore::from_config(&config).unwrap();
    store.list().await.unwrap();
    store.list().await.unwrap();

    let requests = db.requests();
    assert_eq!(requests.len(), 2);
    for r in &requests {
        assert_eq!(r.apikey.as_deref(), Some("anon-test-key"));
        assert_eq!(r.authorization.as_deref(), Some("Bearer anon-test-key"));
        assert_eq!(
            r.query.get("select").map(String::as_str),
            Some("id,step_number,title,description")
        );
        assert_eq!(r.query.get("order").map(String::as_str), Some("step_number.asc"));
    }
    assert!(requests[0].request_id.is_some());
    assert_ne!(requests[0].request_id, requests[1].request_id);
}

#[tokio::test]
async fn deleting_missing_identity_returns_nothing() {
    init_test_logger();
    let (config, db) = spawn_fake_postgrest().await;
    let store: RemoteStore<Pricing> = RemoteStore::from_config(&config).unwrap();
    store.upsert(&bronze()).await.unwrap();

    assert!(store.delete(404).await.unwrap().is_empty());
    assert_eq!(db.row_count("pricing"), 1);

    let removed = store.delete(1).await.unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].name, "Bronze");
    assert!(store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn service_error_message_is_surfaced() {
    init_test_logger();
    let (config, db) = spawn_fake_postgrest().await;
    db.reject("pricing");
    let store: RemoteStore<Pricing> = RemoteStore::from_config(&config).unwrap();

    match store.upsert(&bronze()).await {
        Err(StoreError::Remote { status, message }) => {
            assert_eq!(status, 409);
            assert!(message.starts_with("duplicate key value violates unique constraint"));
            assert!(message.contains("Key (id)=(1) already exists."));
        }
        other => panic!("期望远程错误，实际: {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_remote_is_a_transport_error() {
    init_test_logger();
    let config = RemoteConfig::new("http://127.0.0.1:9", "anon");
    let store: RemoteStore<Pricing> = RemoteStore::from_config(&config).unwrap();
    assert!(matches!(store.list().await, Err(StoreError::Transport(_))));
}

#[tokio::test]
async fn empty_testimonials_are_seeded_once() {
    init_test_logger();
    let (config, db) = spawn_fake_postgrest().await;
    let client = CmsClient::in_memory(ClientConfig::new(Some(config))).unwrap();

    let mut page = client.page::<Testimonial>();
    page.load().await;
    assert_eq!(page.syncer().state(), SyncState::RemoteSourced);
    assert_eq!(db.insert_count("testimonials"), 4);

    let ids: Vec<Option<i64>> = page.items().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    // 插入请求不带 id，由服务端生成
    assert!(db
        .requests()
        .iter()
        .filter(|r| r.method == "POST")
        .all(|r| r.query.get("on_conflict").is_none()));
    let names: Vec<&str> = page.items().iter().map(|t| t.client_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Sarah & Andi", "Budi Santoso", "Anisa Putri", "PT. Maju Bersama"]
    );
    assert!(client.session().is_seeded("testimonials").await.unwrap());

    // 再次观察到空表：标记已存在，不再写入
    db.clear("testimonials");
    let mut again = client.page::<Testimonial>();
    again.load().await;
    assert_eq!(db.insert_count("testimonials"), 4);
    assert_eq!(again.items(), Testimonial::defaults().as_slice());
}

#[tokio::test]
async fn local_default_client_never_touches_the_network() {
    init_test_logger();
    let client = CmsClient::in_memory(ClientConfig::new(None)).unwrap();
    let mut page = client.page::<Pricing>();
    page.load().await;
    assert_eq!(page.syncer().state(), SyncState::LocalDefault);
    assert_eq!(page.items().len(), 3);

    page.on_add();
    page.form_mut().apply_raw("name", "Bronze").unwrap();
    page.form_mut().apply_raw("price", "1000000").unwrap();
    page.form_mut().apply_raw("features", "1 sesi").unwrap();
    page.submit().await;
    assert_eq!(page.items().len(), 4);
    assert_eq!(page.items().last().map(|p| p.name.as_str()), Some("Bronze"));

    // 新的页面访问重新从内置默认数据开始
    let mut fresh = client.page::<Pricing>();
    fresh.load().await;
    assert_eq!(fresh.items().len(), 3);
}

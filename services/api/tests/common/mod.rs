//! Shared fixtures for the HTTP integration tests.
#![allow(dead_code)]

use api_lib::adapters::{DataFiles, JsonFileAdapter, MemorySessionStore};
use api_lib::config::Config;
use api_lib::web::{router, AppState};
use axum::http::{header, HeaderValue};
use axum_test::{TestResponse, TestServer};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

pub const COOKIE_NAME: &str = "connect.sid";

/// A running router over a throwaway data directory.
pub struct TestApp {
    pub server: TestServer,
    pub dir: TempDir,
}

impl TestApp {
    pub fn data_path(&self, file: &str) -> std::path::PathBuf {
        self.dir.path().join(file)
    }

    pub fn read_employees(&self) -> Vec<Value> {
        let raw = std::fs::read_to_string(self.data_path("employee.json")).unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

pub fn users() -> Value {
    json!([
        { "id": 1, "email": "jane@example.com", "password": "password123" },
        { "id": 2, "email": "john@example.com", "password": "hunter2" }
    ])
}

pub fn food_categories() -> Value {
    json!([
        { "id": 2, "category": "Vegetables", "examples": ["Carrot", "Broccoli", "Spinach"] },
        { "id": 1, "category": "Fruits", "examples": ["Apple", "Banana"], "color": "red" },
        { "id": 7, "category": "Grains", "examples": [] }
    ])
}

fn write_json(dir: &Path, file: &str, value: &Value) {
    std::fs::write(dir.join(file), serde_json::to_string_pretty(value).unwrap()).unwrap();
}

/// Starts the app with the given employee collection and the default users
/// and food categories.
pub fn spawn_app(employees: Value) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    write_json(dir.path(), "employee.json", &employees);
    write_json(dir.path(), "food-categories.json", &food_categories());
    write_json(dir.path(), "users.json", &users());
    spawn_app_in(dir)
}

/// Starts the app over an already prepared directory.
pub fn spawn_app_in(dir: TempDir) -> TestApp {
    let data_dir = dir.path().to_string_lossy().into_owned();
    let config = Config::from_lookup(|key| match key {
        "SESSION_SECRET" => Some("integration-secret".to_string()),
        "DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
    .unwrap();

    let store = Arc::new(JsonFileAdapter::new(DataFiles::in_dir(&config.data_dir)));
    let sessions = Arc::new(MemorySessionStore::new(config.session_ttl));
    let state = AppState::new(Arc::new(config), store, sessions).unwrap();

    let server = TestServer::new(router(Arc::new(state))).unwrap();
    TestApp { server, dir }
}

/// The `name=value` pair of the session cookie set by a response, if any.
pub fn session_cookie(response: &TestResponse) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with(&format!("{COOKIE_NAME}=")))
        .map(str::to_string)
}

pub fn cookie_header(pair: &str) -> HeaderValue {
    HeaderValue::from_str(pair).unwrap()
}

/// Asks the session endpoint whether the cookie belongs to a logged-in user.
pub async fn logged_in(server: &TestServer, cookie: &str) -> bool {
    let response = server
        .get("/api/session")
        .add_header(header::COOKIE, cookie_header(cookie))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["loggedIn"].as_bool().unwrap()
}

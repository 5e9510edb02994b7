#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

use roster::config::{AuthConfig, Config, StoreBackend};
use roster::store::{MemoryStore, ProjectStore, UserStore};

pub const AUTH_USER: &str = "admin";
pub const AUTH_PASSWORD: &str = "correct horse battery staple";

/// A running test server backed by a fresh in-memory store.
pub struct TestApp {
    pub addr: SocketAddr,
    pub store: Arc<MemoryStore>,
    pub client: Client,
    pub credentials: Option<(String, String)>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, Some(password)),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> (Value, StatusCode) {
        let resp = self
            .authorize(request)
            .send()
            .await
            .expect("request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn get(&self, path: &str) -> (Value, StatusCode) {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        self.send(self.client.put(self.url(path)).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        self.send(self.client.delete(self.url(path))).await
    }

    /// Create a user, return the user JSON.
    pub async fn create_user(&self, name: &str, email: &str) -> Value {
        let (body, status) = self
            .post("/v1/users", &json!({ "name": name, "email": email }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {body}");
        body
    }

    /// Create a project, return the project JSON.
    pub async fn create_project(&self, name: &str, description: Option<&str>) -> Value {
        let (body, status) = self
            .post(
                "/v1/projects",
                &json!({ "name": name, "description": description }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create project failed: {body}");
        body
    }
}

pub fn test_config() -> Config {
    Config {
        store: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 1,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        default_page_size: 10,
        max_page_size: 100,
        max_body_size: 65_536,
        log_level: "warn".to_string(),
        auth: None,
    }
}

/// Spawn a test app without authentication.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Spawn a test app that requires the `AUTH_USER` / `AUTH_PASSWORD` pair.
/// The returned client sends those credentials on every request.
pub async fn spawn_app_with_auth() -> TestApp {
    let mut config = test_config();
    config.auth = Some(AuthConfig {
        username: AUTH_USER.to_string(),
        password_hash: roster::auth::password::hash(AUTH_PASSWORD).unwrap(),
    });
    let mut app = spawn_app_with(config).await;
    app.credentials = Some((AUTH_USER.to_string(), AUTH_PASSWORD.to_string()));
    app
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let users: Arc<dyn UserStore> = store.clone();
    let projects: Arc<dyn ProjectStore> = store.clone();

    let app = roster::build_app(users, projects, config).expect("Failed to build app");

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    // Spawn server in background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        store,
        client: Client::new(),
        credentials: None,
    }
}

/// Common test utilities for integration tests
///
/// Every test context owns a private in-memory SQLite database with the
/// migrations applied, and a router wired to it.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use taskboard_api::app::{build_router, AppState};
use taskboard_api::config::{ApiConfig, Config, DatabaseConfig};
use taskboard_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig as PoolConfig},
};
use tower::Service as _;

/// Test context containing the router and its database
pub struct TestContext {
    pub db: SqlitePool,
    pub app: Router,
}

impl TestContext {
    /// Creates a new test context with a fresh, migrated database
    pub async fn new() -> anyhow::Result<Self> {
        let db = create_pool(PoolConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let app = build_router(AppState::new(db.clone(), test_config()));

        Ok(TestContext { db, app })
    }

    /// Sends a request and returns the status and JSON body (`Null` when empty)
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");

        let request = match body {
            Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Sends a prepared request
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("Response is not JSON: {}", String::from_utf8_lossy(&bytes))
            })
        };

        (status, json)
    }

    /// Creates a task through the API and returns its JSON
    pub async fn create_task(&self, body: Value) -> Value {
        let (status, json) = self.send("POST", "/tasks", Some(body)).await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", json);
        json
    }

    /// Lists tasks through the API
    pub async fn list_tasks(&self) -> Vec<Value> {
        let (status, json) = self.send("GET", "/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        json.as_array().cloned().unwrap_or_default()
    }
}

fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
    }
}

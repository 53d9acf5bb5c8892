//! Shared test helpers for integration tests.
//!
//! The suite needs a PostgreSQL test database; point
//! `PLANHUB__DATABASE__URL` at one (defaults to the URL in
//! `tests/fixtures/test_config.toml`) and run with
//! `cargo test -- --ignored --test-threads=1`. Tests truncate the shared
//! tables, so they cannot run concurrently.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use planhub_api::AppState;
use planhub_api::router::build_router;
use planhub_api::token::Claims;
use planhub_core::config::AppConfig;

/// A response captured from the router.
pub struct TestResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Parsed JSON body (or `Value::Null` for empty bodies).
    pub body: Value,
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Database pool for direct queries.
    pub db_pool: PgPool,
    /// Application config.
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application against a clean database.
    pub async fn new() -> Self {
        let config = AppConfig::load_file("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");

        let db_pool = planhub_database::DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();

        planhub_database::migration::run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        Self::clean_database(&db_pool).await;

        let state = AppState::build(config.clone(), db_pool.clone());
        let router = build_router(state);

        Self {
            router,
            db_pool,
            config,
        }
    }

    async fn clean_database(pool: &PgPool) {
        for table in ["action_records", "tasks", "notes", "projects"] {
            sqlx::query(&format!("TRUNCATE {table} CASCADE"))
                .execute(pool)
                .await
                .expect("Failed to clean table");
        }
    }

    /// Mint a valid access token for a test user.
    pub fn mint_token(&self, user_id: Uuid, username: &str) -> String {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp: chrono::Utc::now().timestamp() + 3600,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.auth.jwt_secret.as_bytes()),
        )
        .expect("Failed to mint token")
    }

    /// Issue a request against the router and parse the JSON response.
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Body is not valid JSON")
        };

        TestResponse { status, body }
    }

    /// Insert a task row and return its ID.
    pub async fn seed_task(&self, title: &str, status: &str) -> Uuid {
        sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO tasks (title, status) VALUES ($1, $2) RETURNING id",
        )
        .bind(title)
        .bind(status)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to seed task")
    }

    /// Read a task's status column.
    pub async fn task_status(&self, id: Uuid) -> Option<String> {
        sqlx::query_scalar::<_, String>("SELECT status FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await
            .expect("Failed to read task status")
    }

    /// Delete a task row.
    pub async fn delete_task(&self, id: Uuid) {
        sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to delete task");
    }

    /// Count a user's action records directly.
    pub async fn count_actions(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM action_records WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to count actions")
    }
}

#![allow(dead_code)]

use std::ops::RangeInclusive;

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, Router};
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::{Mutex, MutexGuard};
use tower::ServiceExt;

use ecommerce_api::config::AppConfig;
use ecommerce_api::database::{ddl, DatabaseManager};
use ecommerce_api::{router, AppState};

/// Database tests share one schema, so they run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

pub fn test_config(database_url: Option<String>) -> AppConfig {
    let mut config = AppConfig::development();
    config.database.url = database_url;
    config.database.max_connections = 5;
    config.database.connection_timeout = 2;
    config.api.enable_request_logging = false;
    config
}

/// Router over a pool that never connects: nothing answers on port 1.
/// Good for every route that fails or succeeds before reaching storage.
pub fn offline_app() -> Result<Router> {
    let config = test_config(Some("postgres://postgres@127.0.0.1:1/unreachable".to_string()));
    let pool = DatabaseManager::connect_lazy(&config.database)?;
    Ok(router(AppState::new(pool), &config))
}

/// Send one request through the router without a socket.
pub async fn oneshot(app: Router, request: Request<Body>) -> Result<(u16, Vec<u8>)> {
    let response = app.oneshot(request).await.context("router failed")?;
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

/// A live server on an ephemeral port, backed by the database named in
/// `DATABASE_URL`. Holding it holds the database lock.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub pool: PgPool,
    ids: RangeInclusive<i32>,
    _guard: MutexGuard<'static, ()>,
}

impl TestServer {
    /// Returns `None` when no database is configured, so callers can skip.
    ///
    /// Rows whose ids fall in `ids` are removed before the test starts.
    pub async fn start(ids: RangeInclusive<i32>) -> Result<Option<Self>> {
        let _ = dotenvy::dotenv();
        let Some(url) = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty()) else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return Ok(None);
        };

        let guard = DB_LOCK.lock().await;

        let config = test_config(Some(url));
        let pool = DatabaseManager::connect(&config.database).await?;
        ddl::create_tables(&pool).await?;
        clear_range(&pool, &ids).await?;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);
        let app = router(AppState::new(pool.clone()), &config);
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Some(Self {
            base_url,
            client: reqwest::Client::new(),
            pool,
            ids,
            _guard: guard,
        }))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<(u16, Value)> {
        let res = self.client.get(self.url(path)).send().await?;
        read(res).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<(u16, Value)> {
        let res = self.client.post(self.url(path)).json(body).send().await?;
        read(res).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<(u16, Value)> {
        let res = self.client.put(self.url(path)).json(body).send().await?;
        read(res).await
    }

    pub async fn put_empty(&self, path: &str) -> Result<(u16, Value)> {
        let res = self.client.put(self.url(path)).send().await?;
        read(res).await
    }

    pub async fn delete(&self, path: &str) -> Result<(u16, Value)> {
        let res = self.client.delete(self.url(path)).send().await?;
        read(res).await
    }

    /// Rows of a collection whose ids belong to this test.
    pub async fn owned_rows(&self, collection: &str) -> Result<Vec<Value>> {
        let (status, body) = self.get(collection).await?;
        anyhow::ensure!(status == 200, "listing {} returned {}", collection, status);
        let rows = body.as_array().context("collection is not an array")?;
        Ok(rows
            .iter()
            .filter(|row| {
                row["id"]
                    .as_i64()
                    .and_then(|id| i32::try_from(id).ok())
                    .is_some_and(|id| self.ids.contains(&id))
            })
            .cloned()
            .collect())
    }
}

async fn read(res: reqwest::Response) -> Result<(u16, Value)> {
    let status = res.status().as_u16();
    let body = res.json::<Value>().await.unwrap_or(Value::Null);
    Ok((status, body))
}

/// Delete this test's rows, children first.
async fn clear_range(pool: &PgPool, ids: &RangeInclusive<i32>) -> Result<()> {
    let (lo, hi) = (*ids.start(), *ids.end());
    let statements = [
        "DELETE FROM order_products WHERE order_id BETWEEN $1 AND $2 OR product_id BETWEEN $1 AND $2",
        "DELETE FROM orders WHERE id BETWEEN $1 AND $2 OR customer_id BETWEEN $1 AND $2",
        "DELETE FROM customer_accounts WHERE id BETWEEN $1 AND $2 OR customer_id BETWEEN $1 AND $2",
        "DELETE FROM products WHERE id BETWEEN $1 AND $2",
        "DELETE FROM customers WHERE id BETWEEN $1 AND $2",
    ];
    for sql in statements {
        sqlx::query(sql).bind(lo).bind(hi).execute(pool).await?;
    }
    Ok(())
}

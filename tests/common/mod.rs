#![allow(dead_code)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::Value;

use etiquetas_api::database::MemoryProductStore;
use etiquetas_api::middleware::ADMIN_KEY_HEADER;
use etiquetas_api::{app, AppOptions, AppState};

pub const ADMIN_KEY: &str = "test-admin-key";

/// A server running in-process on a free port, backed by an in-memory store
pub struct TestServer {
    pub base_url: String,
    pub store: Arc<MemoryProductStore>,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(MemoryProductStore::new());
        let state = AppState::new(store.clone(), ADMIN_KEY);
        let router = app(state, AppOptions::default());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test listener")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        let server = Self {
            base_url,
            store,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request builder carrying the correct admin key
    pub fn admin(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.url(path))
            .header(ADMIN_KEY_HEADER, ADMIN_KEY)
    }

    pub async fn create_product(&self, body: Value) -> Result<(StatusCode, Value)> {
        let res = self
            .admin(reqwest::Method::POST, "/admin/productos")
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        Ok((status, res.json().await?))
    }

    pub async fn list_products(&self) -> Result<Vec<Value>> {
        let res = self
            .admin(reqwest::Method::GET, "/admin/productos")
            .send()
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "list failed: {}", res.status());
        Ok(res.json().await?)
    }
}

//! # Common Test Utilities
//!
//! `TestApp` spawns the real router on a random port so the integration tests
//! can drive the server over HTTP with `reqwest`.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use jsonzip::ExtractOptions;
use jsonzip_server::{
    config::AppConfig,
    router,
    state::{build_app_state, AppState},
};
use reqwest::Client;
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the default configuration.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_config(AppConfig::default()).await
    }

    /// Spawns the server with the given extraction options.
    pub async fn spawn_with_options(extraction: ExtractOptions) -> Result<Self> {
        Self::spawn_with_config(AppConfig {
            extraction,
            ..AppConfig::default()
        })
        .await
    }

    pub async fn spawn_with_config(config: AppConfig) -> Result<Self> {
        let app_state = build_app_state(config)?;
        Self::spawn_with_state(app_state).await
    }

    /// Spawns the application server around a prepared `AppState`.
    pub async fn spawn_with_state(app_state: AppState) -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        Ok(Self {
            address,
            client: Client::new(),
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked.
            let _ = tx.send(());
        }
    }
}

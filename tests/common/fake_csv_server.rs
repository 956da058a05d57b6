//! Fake CSV host for HTTP fetch tests.
//!
//! Spins up a minimal `axum` server on a random TCP port bound to 127.0.0.1.
//! Serves `GET /data/{file}` from an in-memory map; unknown files are 404.
//!
//! # Example
//!
//! ```rust,no_run
//! let server = FakeCsvServer::start().await.unwrap();
//! server.put("daily_sales_revenue.csv", SALES_CSV).await;
//! let url = format!("{}/daily_sales_revenue.csv", server.base_url());
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

type Files = Arc<Mutex<HashMap<String, String>>>;

/// Handle to the running fake server.
pub struct FakeCsvServer {
    addr: SocketAddr,
    files: Files,
}

impl FakeCsvServer {
    /// Start the server on a random port. Returns once the listener is bound.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let files = Files::default();

        let app = Router::new()
            .route("/data/{file}", get(serve_file))
            .with_state(files.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, files })
    }

    /// Base URL of the data directory, e.g. `http://127.0.0.1:PORT/data`.
    pub fn base_url(&self) -> String {
        format!("http://{}/data", self.addr)
    }

    pub fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url(), file)
    }

    /// Make `body` available at `/data/{file}`.
    pub async fn put(&self, file: &str, body: &str) {
        self.files
            .lock()
            .await
            .insert(file.to_string(), body.to_string());
    }
}

async fn serve_file(Path(file): Path<String>, State(files): State<Files>) -> impl IntoResponse {
    match files.lock().await.get(&file) {
        Some(body) => (StatusCode::OK, body.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

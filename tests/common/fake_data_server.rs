//! Fake snapshot origin for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves `GET /data/{file}` from an in-memory map and counts
//! requests per file, so harnesses can check that the store fetched a
//! document exactly once. Files can be made to fail, to redirect, or to
//! answer slowly.
//!
//! # Example
//!
//! ```rust,ignore
//! let server = FakeDataServer::start().await.unwrap();
//! server.put("sci.json", br#"{"items":[]}"#.to_vec()).await;
//! let source = HttpSource::new(server.base_url(), DatasetFiles::default(), timeout);
//! ```

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct ServerState {
    files: HashMap<String, Vec<u8>>,
    /// Files that answer with this status instead of their body.
    failures: HashMap<String, StatusCode>,
    /// Files that answer `302 Found` with this `Location`.
    redirects: HashMap<String, String>,
    hits: HashMap<String, usize>,
    delay: Option<Duration>,
}

/// Handle to the running fake data server.
pub struct FakeDataServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl FakeDataServer {
    /// Start the server on a random port. Returns once it is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ServerState::default()));

        let app = Router::new()
            .route("/data/{file}", get(serve_file))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Ok(Self { addr, state })
    }

    /// Base URL the dataset files hang off (e.g. `http://127.0.0.1:PORT/data`).
    pub fn base_url(&self) -> String {
        format!("http://{}/data", self.addr)
    }

    pub async fn put(&self, file: &str, body: Vec<u8>) {
        let mut state = self.state.lock().await;
        state.files.insert(file.to_string(), body);
        state.failures.remove(file);
        state.redirects.remove(file);
    }

    /// Make `file` redirect to `location` (relative or absolute).
    pub async fn redirect(&self, file: &str, location: &str) {
        self.state.lock().await.redirects.insert(file.to_string(), location.to_string());
    }

    /// Make `file` answer with `status` until the next [`put`](Self::put).
    pub async fn fail(&self, file: &str, status: StatusCode) {
        self.state.lock().await.failures.insert(file.to_string(), status);
    }

    /// Delay every response, to widen the window for concurrent requests.
    pub async fn set_delay(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    pub async fn hits(&self, file: &str) -> usize {
        self.state.lock().await.hits.get(file).copied().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn serve_file(
    Path(file): Path<String>,
    State(state): State<Arc<Mutex<ServerState>>>,
) -> Response {
    let (delay, response) = {
        let mut state = state.lock().await;
        *state.hits.entry(file.clone()).or_default() += 1;
        let response = if let Some(location) = state.redirects.get(&file) {
            (StatusCode::FOUND, [(header::LOCATION, location.clone())]).into_response()
        } else {
            match state.failures.get(&file) {
                Some(status) => (*status, Vec::new()).into_response(),
                None => match state.files.get(&file) {
                    Some(body) => (StatusCode::OK, body.clone()).into_response(),
                    None => (StatusCode::NOT_FOUND, Vec::new()).into_response(),
                },
            }
        };
        (state.delay, response)
    };

    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    response
}

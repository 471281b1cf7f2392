//! Static file server for the instrumented page.
//!
//! One port, one directory, no other endpoints. The browser loads
//! `index.html` from here; everything else the page references is
//! served from the same directory with its real MIME type.

use crate::error::TeclaResult;
use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A running static server.
#[derive(Debug)]
pub struct StaticServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl StaticServer {
    /// Bind `port` and start serving `dir` on a background task.
    ///
    /// Binding happens before the task is spawned so an occupied port
    /// fails the run immediately.
    pub async fn start(port: u16, dir: impl Into<PathBuf>) -> TeclaResult<Self> {
        let app = router(dir.into());
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "static server stopped");
            }
        });

        tracing::info!(%addr, "serving static files");
        Ok(Self { addr, handle })
    }

    /// Root URL of the server
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://localhost:{}/", self.addr.port())
    }

    /// Bound address
    #[must_use]
    pub const fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop serving
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for StaticServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Router serving `index.html` at `/` and files under `dir` elsewhere.
fn router(dir: PathBuf) -> Router {
    let directory = Arc::new(dir);
    Router::new()
        .route(
            "/",
            get({
                let dir = directory.clone();
                move || serve_index(dir.clone())
            }),
        )
        .fallback({
            let dir = directory;
            move |uri: Uri| serve_static(dir.clone(), uri)
        })
}

async fn serve_index(directory: Arc<PathBuf>) -> Response {
    serve_file(&directory.join("index.html")).await
}

async fn serve_static(directory: Arc<PathBuf>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let file_path = directory.join(path);

    if file_path.is_dir() {
        let index_path = file_path.join("index.html");
        if index_path.exists() {
            return serve_file(&index_path).await;
        }
    }

    serve_file(&file_path).await
}

/// Serve a file with its MIME type and caching disabled, so a rerun
/// after editing the page never tests a stale script.
async fn serve_file(path: &std::path::Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(contents) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, mime_type(path))
            .header(header::CACHE_CONTROL, "no-cache")
            .body(axum::body::Body::from(contents))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            format!("File not found: {}", path.display()),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error reading file: {e}"),
        )
            .into_response(),
    }
}

fn mime_type(path: &std::path::Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html".to_string(),
        Some("js") | Some("mjs") => "text/javascript".to_string(),
        Some("css") => "text/css".to_string(),
        Some("json") => "application/json".to_string(),
        _ => mime_guess::from_path(path)
            .first_or_octet_stream()
            .to_string(),
    }
}

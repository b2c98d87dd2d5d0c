//! Static file relay: maps request paths onto a fixed root directory.
//!
//! `/` resolves to `index.html`, any path component that could escape the
//! root is refused before touching the filesystem, and the content type is
//! inferred from the file extension. Failures answer in plain text: 403 for
//! a traversal attempt, 404 for a missing file.

use std::path::{Component, Path, PathBuf};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;

/// Content type inferred from a file extension.
fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        _ => "text/plain; charset=utf-8",
    }
}

/// Join a request path onto the root, component by component.
///
/// `None` is a traversal attempt: `..`, absolute, or prefixed components are
/// all refused rather than resolved.
fn resolve(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut full = root.to_path_buf();
    for component in Path::new(url_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => full.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(full)
}

/// Serve `url_path` from under `root`.
pub async fn serve(root: &Path, url_path: &str) -> Response {
    let url_path = if url_path == "/" { "/index.html" } else { url_path };
    let Some(full) = resolve(root, url_path) else {
        return plain(StatusCode::FORBIDDEN, "Forbidden");
    };
    match tokio::fs::read(&full).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(&full))],
            bytes,
        )
            .into_response(),
        Err(_) => plain(StatusCode::NOT_FOUND, "Not found"),
    }
}

fn plain(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

/// A whole site served from `root`, used by both clickjacking demo servers.
pub fn site_router(root: PathBuf) -> Router {
    Router::new().fallback(relay_any).with_state(root)
}

async fn relay_any(State(root): State<PathBuf>, uri: Uri) -> Response {
    serve(&root, uri.path()).await
}

//! Evil (attacker) server for the CSRF demo: one static page, no state.

use std::path::PathBuf;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::relay;
use crate::respond::not_found_page;

/// Build the attacker-site router.
pub fn router(pages: PathBuf) -> Router {
    Router::new()
        .route("/", get(attacker_page))
        .route("/evil.html", get(attacker_page))
        .fallback(not_found_page)
        .with_state(pages)
}

async fn attacker_page(State(pages): State<PathBuf>) -> Response {
    relay::serve(&pages, "/evil.html").await
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        router(std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/csrf"))
    }

    #[tokio::test]
    async fn test_serves_attacker_page() {
        for uri in ["/", "/evil.html"] {
            let response = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn test_everything_else_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/bank.html").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

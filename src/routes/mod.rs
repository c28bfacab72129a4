pub mod api_routes;

use std::path::Path;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

use crate::logging::ACCESS_TARGET;
use crate::routes::api_routes::chat_handler;
use crate::service::chat_service::ChatService;

/// API routes only, without static files or middleware.
pub fn api_router(svc: ChatService) -> Router {
    Router::new()
        .route("/api/chat", post(chat_handler))
        .with_state(svc)
}

/// Full application: API, static client at `/`, access log and CORS.
pub fn app_router(svc: ChatService, static_dir: &Path) -> Router {
    api_router(svc)
        .fallback_service(ServeDir::new(static_dir))
        .layer(middleware::from_fn(access_log))
        .layer(CorsLayer::permissive())
}

/// Writes one `HTTP` line per request: method, path, status and latency.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();

    let resp = next.run(req).await;

    info!(
        target: ACCESS_TARGET,
        "{method} {uri} {} {:.1}ms",
        resp.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    resp
}

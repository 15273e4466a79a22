//! Router assembly, middleware and server lifecycle shared by both binaries

use crate::api;
use crate::api::wiki::SharedPages;
use crate::state::SharedCatalog;
use anyhow::Context;
use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use std::time::Instant;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Initialize tracing from `RUST_LOG`
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Response header carrying the id assigned to each request
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Tag each request with a fresh id, log its outcome, and echo the id back
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    let start = Instant::now();
    let mut response = next.run(request).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "request completed"
        )
    });

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn with_request_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // request_id runs inside the trace span
    router
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
}

/// Wiki routes: view, edit and save pages
pub fn wiki_router(pages: SharedPages) -> Router {
    let router: Router<SharedPages> = Router::new()
        .route("/view/:name", get(api::wiki::view_page))
        .route("/edit/:name", get(api::wiki::edit_page))
        .route("/save/:name", post(api::wiki::save_page));

    with_request_layers(router).with_state(pages)
}

/// Catalog routes; `item_lookup` mounts `GET /items/:id`
pub fn catalog_router(catalog: SharedCatalog, item_lookup: bool) -> Router {
    let mut router: Router<SharedCatalog> = Router::new().route(
        "/items",
        get(api::catalog::list_items).post(api::catalog::create_item),
    );
    if item_lookup {
        router = router.route("/items/:id", get(api::catalog::get_item));
    }

    with_request_layers(router).with_state(catalog)
}

/// Bind `addr` and serve `app` until Ctrl+C or SIGTERM
pub async fn serve(addr: &str, app: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    info!("Server running on http://{}", listener.local_addr()?);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolve on the first Ctrl+C or SIGTERM
///
/// A signal source that cannot be installed is logged and never fires.
async fn shutdown_signal() {
    tokio::select! {
        _ = ctrl_c() => info!("Received Ctrl+C, shutting down gracefully..."),
        _ = terminate() => info!("Received SIGTERM, shutting down gracefully..."),
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Ctrl+C handler unavailable");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            sigterm.recv().await;
        }
        Err(e) => {
            tracing::error!(error = %e, "SIGTERM handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}

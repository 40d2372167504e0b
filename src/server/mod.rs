//! HTTP surface for the blog page

use crate::core::page::BlogPage;
use crate::core::ContentSource;
use crate::utils::error::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Every request renders from scratch; nothing is cached between requests.
pub fn router<S: ContentSource + 'static>(page: Arc<BlogPage<S>>) -> Router {
    Router::new()
        .route("/", get(index_handler::<S>))
        .route("/health", get(health_handler))
        .with_state(page)
}

async fn index_handler<S: ContentSource + 'static>(
    State(page): State<Arc<BlogPage<S>>>,
) -> Response {
    match page.render().await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(
                "❌ Page render failed: {} ({})",
                e,
                e.recovery_suggestion()
            );
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
    let bind_host = if host == "localhost" { "127.0.0.1" } else { host };
    let listener = TcpListener::bind((bind_host, port)).await?;
    Ok(listener)
}

/// Serves on an already bound listener until the process stops.
pub async fn serve<S: ContentSource + 'static>(
    listener: TcpListener,
    page: BlogPage<S>,
) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("🚀 Serving blog page at http://{}", addr);

    axum::serve(listener, router(Arc::new(page))).await?;
    Ok(())
}

pub async fn start<S: ContentSource + 'static>(
    page: BlogPage<S>,
    host: &str,
    port: u16,
) -> Result<()> {
    let listener = bind(host, port).await?;
    serve(listener, page).await
}

use crate::config::ServerConfig;
use crate::gateway::Gateway;
use anyhow::Result;
use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};

mod handlers;

/// Start the HTTP host
pub async fn serve(addr: &str, config: ServerConfig) -> Result<()> {
    let gateway = Gateway::new(&config)?;

    let app = create_router(gateway);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Every path and verb goes to the gateway, which owns routing, CORS and
/// error shapes.
pub fn create_router(gateway: Gateway) -> Router {
    Router::new()
        .fallback(handlers::ingress)
        // Header values are left out of the span: they carry tenant credentials.
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(false))
                .on_response(DefaultOnResponse::new().include_headers(false)),
        )
        .with_state(gateway)
}

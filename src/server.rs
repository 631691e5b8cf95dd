/// HTTP server setup and routing
use crate::{
    context::AppContext,
    error::{RouterError, RouterResult},
};
use axum::{
    http::{Method, StatusCode},
    response::Json,
    Router,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Build the main application router
///
/// Everything outside the routing contract falls through to the 404 handler.
pub fn build_router(ctx: AppContext) -> Router {
    // Public read-only API: any origin may GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .merge(crate::api::routes())
        .with_state(ctx)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// 404 handler, shared with the per-route method fallback
pub(crate) async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "message": "not found"
        })),
    )
}

/// Start the HTTP server
pub async fn serve(ctx: AppContext) -> RouterResult<()> {
    let addr = format!("{}:{}", ctx.config.service.hostname, ctx.config.service.port);

    info!("Routing directory listening on {}", addr);
    info!("   Provider TTL: {}s", ctx.config.directory.provider_ttl_secs);

    let app = build_router(ctx);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| RouterError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    // Stop accepting on SIGINT, drain in-flight requests, release the port
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RouterError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

/// Resolve when the process is asked to stop
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining in-flight requests"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}

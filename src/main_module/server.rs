//! HTTP server initialization and routing

use axum::{routing::get, Router};
use log::{error, info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api_router::configure_api_routes;
use crate::core::state::AppState;
use crate::core::urls::ApiUrls;
use crate::security::create_cors_layer;

use super::{drain_with_deadline, health_check, shutdown_signal, SHUTDOWN_GRACE_PERIOD};

/// Full application router: API, UI fragments and static assets.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = create_cors_layer(&app_state.config.cors_allowed_origins);

    let base_router = Router::new()
        .route(ApiUrls::HEALTH, get(health_check))
        .merge(configure_api_routes())
        .with_state(app_state.clone());

    let app = match app_state.config.static_dir.as_ref() {
        Some(dir) if dir.is_dir() => {
            info!("Serving static files from {}", dir.display());
            base_router.fallback_service(ServeDir::new(dir))
        }
        Some(dir) => {
            warn!(
                "STATIC_DIR {} does not exist, falling back to embedded UI",
                dir.display()
            );
            base_router.merge(crate::embedded_ui::embedded_ui_router())
        }
        None => base_router.merge(crate::embedded_ui::embedded_ui_router()),
    };

    app.layer(cors).layer(TraceLayer::new_for_http())
}

/// Binds `host:port`, resolving host names such as `localhost`.
pub async fn bind_listener(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

pub async fn run_axum_server(app_state: Arc<AppState>) -> std::io::Result<()> {
    let server = &app_state.config.server;
    let addr = format!("{}:{}", server.host, server.port);

    if !crate::embedded_ui::has_embedded_ui() {
        warn!("No embedded UI bundle found; only the API will be served");
    }
    if app_state.llm.is_none() {
        warn!("GEMINI_API_KEY not set. /api/ai/overview will return a fallback summary.");
    }

    let app = build_router(app_state.clone());

    let listener = match bind_listener(&server.host, server.port).await {
        Ok(l) => l,
        Err(e) => {
            error!(
                "Failed to bind to {}: {} - is another instance running?",
                addr, e
            );
            return Err(e);
        }
    };

    info!("Server running on http://{}", addr);
    info!("Health check: http://{}{}", addr, ApiUrls::HEALTH);
    info!("AI overview: POST {} (uses Gemini if configured)", ApiUrls::AI_OVERVIEW);

    let (signalled_tx, signalled_rx) = oneshot::channel();
    let serve = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    });
    let handle = tokio::spawn(async move { serve.await });

    drain_with_deadline(handle, signalled_rx, SHUTDOWN_GRACE_PERIOD).await?;

    info!("Server closed successfully");
    Ok(())
}

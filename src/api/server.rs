use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use super::{
    services::{chat, define, feed, health, pdf},
    state::AppState,
};
use crate::config::Config;
use crate::providers::{GeminiClient, TavilyClient};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the router with CORS, request tracing and the body limit applied
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/define", post(define))
        .route("/api/feed", post(feed))
        .route("/api/pdf", get(pdf))
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Start the API with live providers and serve until Ctrl+C or SIGTERM
pub async fn run(config: Config) -> Result<(), AnyError> {
    config.require_credentials()?;

    let search = Arc::new(TavilyClient::new(&config.search)?);
    let generator = Arc::new(GeminiClient::new(&config.generation)?);
    info!(
        model = %config.generation.model,
        output = %config.article.output_path.display(),
        "Providers ready"
    );

    let address = config.server.bind_addr;
    let app = router(AppState::new(config, search, generator));

    let listener = TcpListener::bind(address).await?;
    info!(%address, "Adoread API listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

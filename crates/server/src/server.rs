//! Server initialization and routing
//!
//! Router setup, middleware stack and graceful shutdown.

use crate::config::ServerConfig;
use crate::telemetry::install_metrics;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, not_found};
use crate::routes::{corpus, health, suggest};
use crate::state::ServerState;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    if !config.enable_cors {
        return CorsLayer::new();
    }
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "cors_origin_ignored");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Build the Axum router with all routes and middleware
///
/// Static routes (`/`, `/public/*`, `/health`, `/api/v1/*`) win over the
/// `/{phrase}` lookup. Request ids are assigned before request logging runs.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let config = &state.config;

    let api_routes = Router::new()
        .route("/api/v1/info", get(api_info))
        .route("/api/v1/suggest", get(suggest::suggest_query))
        .route("/api/v1/corpus", get(corpus::corpus_stats))
        .route("/api/v1/corpus/reload", post(corpus::reload_corpus));

    let public_routes = Router::new()
        .route_service("/", ServeFile::new(&config.index_page))
        .nest_service("/public", ServeDir::new(&config.static_dir))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics))
        .route("/{phrase}", get(suggest::suggest_phrase));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.timeout(),
        ))
        .layer(CompressionLayer::new())
        .layer(cors_layer(config))
        .layer(from_fn(log_requests))
        .layer(from_fn(request_id))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the wordsim HTTP server
///
/// Blocks until SIGTERM or Ctrl+C. The corpus is loaded before the listener
/// opens when `preload_corpus` is set, so a bad corpus fails startup.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_thread_names(true)
        .json()
        .init();

    let mut state = ServerState::new(config.clone())?;
    if config.metrics_enabled {
        state = state.with_metrics(install_metrics()?);
    }

    if config.preload_corpus {
        let corpus = state.service.load_corpus().await?;
        tracing::info!(
            entries = corpus.len(),
            dimension = ?corpus.dimension(),
            mismatched = corpus.mismatched_entries(),
            "corpus_preloaded"
        );
    }

    let app = build_router(Arc::new(state));
    let addr: SocketAddr = config.socket_addr()?;

    tracing::info!(
        addr = %addr,
        timeout_secs = config.timeout_secs,
        cors = config.enable_cors,
        cors_origins = config.cors_allowed_origins.len(),
        metrics = config.metrics_enabled,
        "server_starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server_stopped");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "ctrl_c_handler_failed");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "sigterm_handler_failed");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("shutdown_ctrl_c"),
        _ = terminate => tracing::info!("shutdown_sigterm"),
    }
}

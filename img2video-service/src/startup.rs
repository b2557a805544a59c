//! Application startup and lifecycle management.

use crate::config::Img2VideoConfig;
use crate::handlers;
use crate::services::NovitaClient;
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;

/// Shared application state. Immutable for the lifetime of the process.
#[derive(Clone)]
pub struct AppState {
    pub config: Img2VideoConfig,
    pub novita: NovitaClient,
}

impl AppState {
    pub fn new(config: Img2VideoConfig) -> Self {
        let novita = NovitaClient::new(config.vendor.clone());
        Self { config, novita }
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.common.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/v1/img2video", post(handlers::img2video::create_img2video))
        .merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and assemble the router. Port 0 picks a free port.
    pub async fn build(config: Img2VideoConfig) -> Result<Self, AppError> {
        let address = config.common.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState::new(config);
        if state.novita.is_configured() {
            tracing::info!(endpoint = %state.novita.endpoint(), "Novita client initialized");
        } else {
            tracing::warn!(
                "NOVITA_API_KEY not configured - img2video requests will fail until it is set"
            );
        }

        let router = build_router(state);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("img2video-service listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}

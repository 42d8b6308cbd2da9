//! HTTP API
//!
//! REST endpoints for the storefront frontend.

mod types;

pub use types::*;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogSource;
use crate::config::{CorsConfig, ServerConfig};
use crate::oracle::PriceOracle;
use crate::pricing::PricingEngine;
use crate::types::PriceFilter;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub oracle: Arc<PriceOracle>,
    pub catalog: Arc<dyn CatalogSource>,
    pub engine: PricingEngine,
}

impl AppState {
    pub fn new(oracle: Arc<PriceOracle>, catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            oracle,
            catalog,
            engine: PricingEngine::new(),
        }
    }
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/api/products", get(get_products))
        .route("/api/health", get(get_health))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors)),
        )
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any)
}

// ─────────────────────────────────────────────────────────────────
// API Handlers
// ─────────────────────────────────────────────────────────────────

/// GET /api/products?minPrice=&maxPrice=&minPopularity=
async fn get_products(
    State(state): State<AppState>,
    query: Result<Query<PriceFilter>, QueryRejection>,
) -> Response {
    let Query(filter) = match query {
        Ok(query) => query,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "Rejected product query");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(rejection.body_text())),
            )
                .into_response();
        }
    };

    let items = state.catalog.load().await;
    let price_per_gram = state.oracle.reference_price_per_gram().await;
    let priced = state.engine.price_and_filter(&items, price_per_gram, &filter);

    Json(priced).into_response()
}

/// GET /api/health - cached gold price, no feed request
async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.oracle.snapshot().await;
    Json(ApiResponse::success(HealthResponse {
        status: "ok",
        gold_price_per_gram: snapshot.price_per_gram,
        gold_price_updated_at: snapshot.updated_at,
        gold_feed: state.oracle.feed_name(),
        catalog_source: state.catalog.name(),
    }))
}

/// Start the API server and run until Ctrl-C
pub async fn start_server(
    state: AppState,
    server: &ServerConfig,
    cors: &CorsConfig,
) -> anyhow::Result<()> {
    let app = create_router(state, cors);
    let addr = format!("{}:{}", server.host, server.port);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

pub mod handlers;

use std::sync::Arc;

use axum::extract::{MatchedPath, Request};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

use crate::catalog::RecipeCatalog;
use crate::error::Result;
use crate::grocery::GroceryConsolidator;
use crate::planner::ExhaustionPolicy;

pub use handlers::{ApiError, ErrorResponse};

/// Shared, read-only state behind every request.
pub struct AppState {
    pub catalog: RecipeCatalog,
    pub consolidator: GroceryConsolidator,
    pub policy: ExhaustionPolicy,
    /// Cancelled on shutdown; requests derive child tokens from it.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(catalog: RecipeCatalog, consolidator: GroceryConsolidator) -> Self {
        Self {
            catalog,
            consolidator,
            policy: ExhaustionPolicy::default(),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/generate-meal-plan", post(handlers::generate_meal_plan))
        .route("/api/generate-grocery-list", post(handlers::generate_grocery_list))
        .route("/api/recipes", get(handlers::list_recipes))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request| {
                    let matched_path = request
                        .extensions()
                        .get::<MatchedPath>()
                        .map(MatchedPath::as_str)
                        .unwrap_or(request.uri().path());

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                })
                .on_request(|_request: &Request, _span: &Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, _span: &Span| {
                        tracing::info!(
                            status = %response.status().as_u16(),
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    },
                ),
        )
}

/// Serve the API on `bind` until `state.shutdown` is cancelled.
pub async fn serve(bind: &str, state: Arc<AppState>) -> Result<()> {
    let listener = TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "Server listening");

    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    info!("Server stopped");
    Ok(())
}

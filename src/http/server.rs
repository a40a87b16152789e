use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::core::config::ServiceConfig;
use crate::core::error::{Result, SearchError};
use crate::search::engine::SearchEngine;
use crate::search::models::SearchFailure;


pub const SERVICE_NAME: &str = "listing-search";


#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}


#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
}


pub fn create_router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/search", get(handle_search))
        .route("/health", get(handle_health))
        .with_state(AppState { engine })
}


async fn handle_search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("search", %request_id);

    async move {
        match state.engine.search(params.q.as_deref()).await {
            Ok(response) => (StatusCode::OK, Json(response)).into_response(),
            Err(e) => {
                error!("Search failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(SearchFailure::default())).into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}


pub async fn serve(config: &ServiceConfig, engine: Arc<SearchEngine>) -> Result<()> {
    let app = create_router(engine);
    let addr = config.bind_addr();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| SearchError::Internal(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("🚀 {} listening on http://{}", SERVICE_NAME, addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| SearchError::Internal(format!("HTTP server error: {}", e)))?;

    Ok(())
}

use crate::error::AppError;
use crate::handlers::{tokens, ws};
use crate::models::HealthResponse;
use axum::{Json, Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let token_routes = Router::new()
        .route("/all", get(tokens::all_tokens))
        .route("/{section}", get(tokens::by_section));

    Router::new()
        .route("/health", get(health))
        .nest("/api/tokens", token_routes)
        .route("/ws", get(ws::ws_handler))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        message: "token table backend is running",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

async fn not_found() -> AppError {
    AppError::NotFound("route not found".to_string())
}

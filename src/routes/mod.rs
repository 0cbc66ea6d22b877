use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri},
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{response::ApiResponse, state::AppState};

pub mod doc;
pub mod extract;
pub mod health;
pub mod products;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new().nest("/product", products::router())
}

/// Every route the service exposes, with stored images served from the upload root.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.config.upload_root.join("uploads"));
    let body_limit = state.config.body_limit();

    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .nest("/api", create_api_router())
        .nest_service("/uploads", uploads)
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<()>>) {
    tracing::debug!(path = uri.path(), "no route");
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::failure("Not Found")),
    )
}

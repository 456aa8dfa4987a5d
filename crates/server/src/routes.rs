use axum::{
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::session::require_session;
use crate::state::ServerState;

pub mod issues;
pub mod roadmaps;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics() -> impl IntoResponse {
    observability::encode_metrics()
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router: public roadmap reads plus session-gated issue writes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/api/roadmaps/:roadmap_id", get(roadmaps::get_full))
        .route("/api/roadmaps/:roadmap_id/mini", get(roadmaps::get_mini))
        .route("/api/roadmaps/:roadmap_id/tags", get(roadmaps::get_tags))
        .route("/api/roadmaps/:roadmap_id/owner", get(roadmaps::get_owner))
        .route("/api/roadmaps/:roadmap_id/owner/mini", get(roadmaps::get_owner_mini));

    // Issue writes need a caller
    let protected = Router::new()
        .route("/api/roadmaps/:roadmap_id/issues", post(issues::create))
        .route("/api/roadmaps/:roadmap_id/issues/:issue_id", delete(issues::delete))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_session));

    public
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use service::errors::ServiceError;
use service::roadmaps::{RoadmapMiniView, RoadmapView, TagsView};
use service::users::ForwardedResponse;

use crate::errors::ApiError;
use crate::observability::{ROADMAP_READS_TOTAL, USERS_SERVICE_FAILURES_TOTAL};
use crate::state::ServerState;

fn forward(result: Result<ForwardedResponse, ServiceError>) -> Result<(StatusCode, Json<Value>), ApiError> {
    match result {
        Ok(fwd) => {
            let status = StatusCode::from_u16(fwd.status).unwrap_or(StatusCode::OK);
            Ok((status, Json(fwd.body)))
        }
        Err(e) => {
            if matches!(e, ServiceError::Dependency(_)) {
                USERS_SERVICE_FAILURES_TOTAL.inc();
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(get, path = "/api/roadmaps/{roadmap_id}", tag = "roadmaps",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    responses((status = 200, description = "Roadmap", body = crate::openapi::RoadmapDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Roadmap does not exist")))]
pub async fn get_full(State(state): State<ServerState>, Path(roadmap_id): Path<String>) -> Result<Json<RoadmapView>, ApiError> {
    ROADMAP_READS_TOTAL.with_label_values(&["full"]).inc();
    Ok(Json(state.roadmaps.get_full(&roadmap_id).await?))
}

#[utoipa::path(get, path = "/api/roadmaps/{roadmap_id}/mini", tag = "roadmaps",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    responses((status = 200, description = "Roadmap summary", body = crate::openapi::RoadmapMiniDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Roadmap does not exist")))]
pub async fn get_mini(State(state): State<ServerState>, Path(roadmap_id): Path<String>) -> Result<Json<RoadmapMiniView>, ApiError> {
    ROADMAP_READS_TOTAL.with_label_values(&["mini"]).inc();
    Ok(Json(state.roadmaps.get_mini(&roadmap_id).await?))
}

#[utoipa::path(get, path = "/api/roadmaps/{roadmap_id}/tags", tag = "roadmaps",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    responses((status = 200, description = "Tag names", body = crate::openapi::TagsDoc), (status = 400, description = "Invalid id"), (status = 404, description = "Roadmap does not exist")))]
pub async fn get_tags(State(state): State<ServerState>, Path(roadmap_id): Path<String>) -> Result<Json<TagsView>, ApiError> {
    ROADMAP_READS_TOTAL.with_label_values(&["tags"]).inc();
    Ok(Json(state.roadmaps.get_tags(&roadmap_id).await?))
}

#[utoipa::path(get, path = "/api/roadmaps/{roadmap_id}/owner", tag = "roadmaps",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    responses((status = 200, description = "Owner profile from the users service"), (status = 404, description = "Roadmap does not exist"), (status = 500, description = "Users service failure")))]
pub async fn get_owner(State(state): State<ServerState>, Path(roadmap_id): Path<String>) -> Result<(StatusCode, Json<Value>), ApiError> {
    ROADMAP_READS_TOTAL.with_label_values(&["owner"]).inc();
    forward(state.roadmaps.get_owner(&roadmap_id).await)
}

#[utoipa::path(get, path = "/api/roadmaps/{roadmap_id}/owner/mini", tag = "roadmaps",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    responses((status = 200, description = "Abbreviated owner profile"), (status = 404, description = "Roadmap does not exist"), (status = 500, description = "Users service failure")))]
pub async fn get_owner_mini(State(state): State<ServerState>, Path(roadmap_id): Path<String>) -> Result<(StatusCode, Json<Value>), ApiError> {
    ROADMAP_READS_TOTAL.with_label_values(&["owner_mini"]).inc();
    forward(state.roadmaps.get_owner_mini(&roadmap_id).await)
}

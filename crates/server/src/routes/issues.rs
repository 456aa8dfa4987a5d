use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use service::domain::CallerIdentity;
use service::errors::ServiceError;
use service::issues::{DeleteAck, IssueCreated};

use crate::errors::ApiError;
use crate::observability::{AUTHZ_DENIED_TOTAL, ISSUES_CREATED_TOTAL, ISSUES_DELETED_TOTAL};
use crate::state::ServerState;

// The body is read raw: the `issue` field may hold an encoded JSON string.
#[utoipa::path(post, path = "/api/roadmaps/{roadmap_id}/issues", tag = "issues",
    params(("roadmap_id" = String, Path, description = "Roadmap id")),
    request_body = crate::openapi::CreateIssueRequest,
    responses((status = 201, description = "Created", body = crate::openapi::IssueCreatedDoc), (status = 400, description = "Issue data is invalid"), (status = 401, description = "No session"), (status = 500, description = "Issue could not be saved")))]
pub async fn create(
    State(state): State<ServerState>,
    caller: Option<Extension<CallerIdentity>>,
    Path(roadmap_id): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<IssueCreated>), ApiError> {
    let caller = caller.map(|Extension(c)| c);
    let created = state.issues.create(&roadmap_id, &body, caller.as_ref()).await?;
    ISSUES_CREATED_TOTAL.inc();
    Ok((StatusCode::CREATED, Json(created)))
}

/// The roadmap segment of the path is not consulted; the issue's own roadmap is.
#[utoipa::path(delete, path = "/api/roadmaps/{roadmap_id}/issues/{issue_id}", tag = "issues",
    params(("roadmap_id" = String, Path, description = "Roadmap id"), ("issue_id" = String, Path, description = "Issue id")),
    responses((status = 200, description = "Deleted", body = crate::openapi::DeleteAckDoc), (status = 401, description = "No session"), (status = 403, description = "Not owner of issue or roadmap"), (status = 404, description = "Issue not found")))]
pub async fn delete(
    State(state): State<ServerState>,
    caller: Option<Extension<CallerIdentity>>,
    Path((_roadmap_id, issue_id)): Path<(String, String)>,
) -> Result<Json<DeleteAck>, ApiError> {
    let caller = caller.map(|Extension(c)| c);
    match state.issues.delete(&issue_id, caller.as_ref()).await {
        Ok(ack) => {
            ISSUES_DELETED_TOTAL.inc();
            Ok(Json(ack))
        }
        Err(e @ ServiceError::Forbidden(_)) => {
            AUTHZ_DENIED_TOTAL.inc();
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

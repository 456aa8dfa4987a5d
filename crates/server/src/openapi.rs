use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct RoadmapDoc {
    pub id: String,
    pub name: String,
    pub description: String,
    pub ownerId: String,
    pub issueCount: String,
    pub createdAt: String,
    pub updatedAt: String,
    pub isPublic: bool,
    pub data: String,
}

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct RoadmapMiniDoc {
    pub id: String,
    pub name: String,
    pub description: String,
    pub issueCount: String,
    pub ownerId: String,
}

#[derive(ToSchema)]
pub struct TagsDoc { pub tags: Vec<String> }

/// `issue` is either an issue object or the same object encoded as a JSON string.
#[derive(ToSchema)]
pub struct CreateIssueRequest {
    #[schema(value_type = Object)]
    pub issue: serde_json::Value,
}

#[derive(ToSchema)]
pub struct IssueCreatedDoc { pub id: String }

#[derive(ToSchema)]
pub struct DeleteAckDoc { pub success: bool }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::roadmaps::get_full,
        crate::routes::roadmaps::get_mini,
        crate::routes::roadmaps::get_tags,
        crate::routes::roadmaps::get_owner,
        crate::routes::roadmaps::get_owner_mini,
        crate::routes::issues::create,
        crate::routes::issues::delete,
    ),
    components(
        schemas(
            HealthResponse,
            RoadmapDoc,
            RoadmapMiniDoc,
            TagsDoc,
            CreateIssueRequest,
            IssueCreatedDoc,
            DeleteAckDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "roadmaps"),
        (name = "issues")
    )
)]
pub struct ApiDoc;

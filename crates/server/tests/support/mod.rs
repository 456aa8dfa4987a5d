#![allow(dead_code)]
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::ServerState;
use service::session::JwtSessionResolver;
use service::store::mock::MemoryRoadmapStore;
use service::users::HttpUserDirectory;

pub const SECRET: &str = "test-secret";

/// Nothing listens on the discard port, so owner lookups fail fast.
pub const DEAD_USERS_URL: &str = "http://127.0.0.1:9/api";

pub fn app(store: Arc<MemoryRoadmapStore>, users_base_url: &str) -> Router {
    let state = ServerState::new(
        store,
        Arc::new(HttpUserDirectory::new(users_base_url)),
        Arc::new(JwtSessionResolver::new(SECRET)),
    );
    routes::build_router(state, CorsLayer::very_permissive())
}

pub fn bearer(user_id: i64) -> String {
    let token = JwtSessionResolver::new(SECRET)
        .issue(user_id, chrono::Duration::hours(1))
        .expect("issue token");
    format!("Bearer {token}")
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<(u16, serde_json::Value)> {
    let resp: Response<Body> = app.clone().oneshot(req).await?;
    let status = resp.status().as_u16();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { serde_json::Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, body))
}

pub fn get(uri: &str) -> anyhow::Result<Request<Body>> {
    Ok(Request::builder().method("GET").uri(uri).body(Body::empty())?)
}

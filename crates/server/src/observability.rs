use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static ROADMAP_READS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "roadmap_api_roadmap_reads_total",
        "Roadmap read requests by view",
        &["view"]
    )
    .expect("register roadmap_reads_total")
});

pub static ISSUES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("roadmap_api_issues_created_total", "Issues successfully created")
        .expect("register issues_created_total")
});

pub static ISSUES_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("roadmap_api_issues_deleted_total", "Issues successfully deleted")
        .expect("register issues_deleted_total")
});

pub static AUTHZ_DENIED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "roadmap_api_authorization_denied_total",
        "Issue deletions rejected because the caller owns neither issue nor roadmap"
    )
    .expect("register authorization_denied_total")
});

pub static USERS_SERVICE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "roadmap_api_users_service_failures_total",
        "Owner lookups that failed against the users service"
    )
    .expect("register users_service_failures_total")
});

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (axum::http::StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

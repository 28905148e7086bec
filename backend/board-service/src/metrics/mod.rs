//! Prometheus metrics for board-service.
//!
//! Exposes content and auth collectors and an HTTP handler for the
//! `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Posts created through the API.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "board_posts_created_total",
        "Total posts created"
    )
    .expect("failed to register board_posts_created_total");

    /// Comments appended to posts.
    pub static ref COMMENTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "board_comments_created_total",
        "Total comments created"
    )
    .expect("failed to register board_comments_created_total");

    /// Registrations segmented by outcome (created/replaced).
    pub static ref ACCOUNTS_REGISTERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "board_accounts_registered_total",
        "Account registrations segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register board_accounts_registered_total");

    /// Rejected authentication attempts segmented by reason.
    pub static ref AUTH_FAILURES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "board_auth_failures_total",
        "Rejected authentication attempts segmented by reason",
        &["reason"]
    )
    .expect("failed to register board_auth_failures_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}

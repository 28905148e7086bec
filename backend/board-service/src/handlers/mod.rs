/// HTTP handlers for board-service
///
/// This module contains handlers for:
/// - Auth: sign-up and sign-in (session cookie issuance)
/// - Posts: create and list posts, append comments
/// - Health: liveness and summary probes
pub mod auth;
pub mod health;
pub mod posts;

use crate::error::AppError;
use crate::metrics::serve_metrics;
use actix_web::web;

// Re-export handler functions at module level
pub use auth::{signin, signup};
pub use health::{health_summary, liveness_check};
pub use posts::{add_comment, create_post, list_posts};

/// JSON body extractor settings: bodies are parsed regardless of
/// `Content-Type` and failures surface as `BadRequest`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(|err, _req| {
            AppError::BadRequest(format!("Invalid request payload: {}", err)).into()
        })
}

/// Path extractor settings: an unparseable id is `BadRequest`, not 404.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid post ID: {}", err)).into())
}

/// Register every route. Shared by the binary and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/metrics", web::get().to(serve_metrics))
        // Health check endpoints
        .route("/health", web::get().to(health_summary))
        .route("/health/live", web::get().to(liveness_check))
        .route("/signup", web::post().to(signup))
        .route("/signin", web::post().to(signin))
        .service(
            web::resource("/posts")
                .route(web::get().to(list_posts))
                .route(web::post().to(create_post)),
        )
        .route("/posts/{id}/comments", web::post().to(add_comment));
}

use crate::AppState;
use actix_web::{web, HttpResponse};

pub async fn health_summary(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "board-service",
        "version": env!("CARGO_PKG_VERSION"),
        "posts": state.content.len(),
        "accounts": state.credentials.len(),
    }))
}

pub async fn liveness_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({"alive": true}))
}

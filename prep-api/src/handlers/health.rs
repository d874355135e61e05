use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::storage::Stores;

pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "preptrack API"
    }))
}

pub async fn health(stores: web::Data<Arc<Stores>>) -> impl Responder {
    match stores.backend.ping().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "storage": stores.backend.kind()
        })),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "status": "unhealthy",
                "storage": stores.backend.kind()
            }))
        }
    }
}

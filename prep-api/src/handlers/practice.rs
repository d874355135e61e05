use actix_web::{web, HttpResponse, Result};
use shared_types::{LimitQuery, PracticeListQuery, PracticeSessionsResponse};
use std::sync::Arc;

use super::error::ApiError;
use crate::queries;
use crate::storage::Stores;

pub async fn list_sessions(
    stores: web::Data<Arc<Stores>>,
    query: web::Query<PracticeListQuery>,
) -> Result<HttpResponse, ApiError> {
    let sessions = stores
        .practice
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch practice sessions"))?;

    let sessions = queries::filter_sessions(sessions, &query);

    Ok(HttpResponse::Ok().json(PracticeSessionsResponse { sessions }))
}

pub async fn recent_sessions(
    stores: web::Data<Arc<Stores>>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let sessions = stores
        .practice
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch practice sessions"))?;

    let limit = query.limit.unwrap_or(queries::DEFAULT_LIMIT);

    Ok(HttpResponse::Ok().json(PracticeSessionsResponse {
        sessions: queries::recent_sessions(sessions, limit),
    }))
}

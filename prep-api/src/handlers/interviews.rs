use actix_web::{web, HttpResponse, Result};
use shared_types::{InterviewListQuery, InterviewsResponse, LimitQuery};
use std::sync::Arc;

use super::error::ApiError;
use crate::queries;
use crate::storage::Stores;

pub async fn list_interviews(
    stores: web::Data<Arc<Stores>>,
    query: web::Query<InterviewListQuery>,
) -> Result<HttpResponse, ApiError> {
    let interviews = stores
        .interviews
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch interviews"))?;

    let interviews = queries::filter_interviews(interviews, &query);

    Ok(HttpResponse::Ok().json(InterviewsResponse { interviews }))
}

pub async fn upcoming_interviews(
    stores: web::Data<Arc<Stores>>,
    query: web::Query<LimitQuery>,
) -> Result<HttpResponse, ApiError> {
    let interviews = stores
        .interviews
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch interviews"))?;

    let limit = query.limit.unwrap_or(queries::DEFAULT_LIMIT);
    let interviews = queries::upcoming_interviews(interviews, chrono::Utc::now(), limit);

    Ok(HttpResponse::Ok().json(InterviewsResponse { interviews }))
}

use actix_web::{web, HttpResponse, Result};
use std::sync::Arc;

use super::error::ApiError;
use crate::queries;
use crate::storage::Stores;

pub async fn get_dashboard(stores: web::Data<Arc<Stores>>) -> Result<HttpResponse, ApiError> {
    let (companies, interviews, sessions) = tokio::try_join!(
        stores.companies.list(),
        stores.interviews.list(),
        stores.practice.list(),
    )
    .map_err(|e| ApiError::from_store(e, "Failed to build dashboard"))?;

    let summary = queries::summarize(&companies, &interviews, &sessions, chrono::Utc::now());

    Ok(HttpResponse::Ok().json(summary))
}

use actix_web::{web, HttpResponse, Result};
use shared_types::{CompaniesResponse, SearchQuery};
use std::sync::Arc;

use super::error::ApiError;
use crate::queries;
use crate::storage::Stores;

pub async fn list_companies(
    stores: web::Data<Arc<Stores>>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let companies = stores
        .companies
        .list()
        .await
        .map_err(|e| ApiError::from_store(e, "Failed to fetch companies"))?;

    let companies = queries::search_companies(companies, query.q.as_deref());

    Ok(HttpResponse::Ok().json(CompaniesResponse { companies }))
}

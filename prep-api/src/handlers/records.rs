//! Handlers shared by every collection: get, create, update and delete.

use actix_web::{web, HttpResponse, Result};
use serde_json::{Map, Value};
use shared_types::{Company, DeleteRequest, Interview, PracticeSession, SuccessResponse};
use std::sync::Arc;

use super::error::ApiError;
use crate::storage::{Collection, Record, Stores};

/// A record type with a collection in [`Stores`].
pub trait CollectionRecord: Record {
    fn collection(stores: &Stores) -> &Collection<Self>;
}

impl CollectionRecord for Company {
    fn collection(stores: &Stores) -> &Collection<Self> {
        &stores.companies
    }
}

impl CollectionRecord for Interview {
    fn collection(stores: &Stores) -> &Collection<Self> {
        &stores.interviews
    }
}

impl CollectionRecord for PracticeSession {
    fn collection(stores: &Stores) -> &Collection<Self> {
        &stores.practice
    }
}

fn failed<T: Record>(action: &str) -> String {
    format!("Failed to {} {}", action, T::LABEL.to_lowercase())
}

pub async fn get_record<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    let record = T::collection(&stores)
        .get(&id)
        .await
        .map_err(|e| ApiError::from_store(e, failed::<T>("fetch")))?;

    Ok(HttpResponse::Ok().json(record))
}

pub async fn create_record<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    request: web::Json<T>,
) -> Result<HttpResponse, ApiError> {
    let created = T::collection(&stores)
        .create(request.into_inner())
        .await
        .map_err(|e| ApiError::from_store(e, failed::<T>("save")))?;

    Ok(HttpResponse::Ok().json(created))
}

pub async fn update_record<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    path: web::Path<String>,
    request: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    apply_update::<T>(&stores, &id, request.into_inner()).await
}

/// `PUT` on the collection itself, carrying the id in the body.
pub async fn update_by_body<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    request: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    let (id, patch) = split_update_body(request.into_inner())?;
    apply_update::<T>(&stores, &id, patch).await
}

async fn apply_update<T: CollectionRecord>(
    stores: &Stores,
    id: &str,
    patch: Map<String, Value>,
) -> Result<HttpResponse, ApiError> {
    let updated = T::collection(stores)
        .update(id, patch)
        .await
        .map_err(|e| ApiError::from_store(e, failed::<T>("update")))?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Accepts either `{ "id": ..., "updates": { ... } }` or a full record that
/// carries its own `id`.
fn split_update_body(mut body: Map<String, Value>) -> Result<(String, Map<String, Value>), ApiError> {
    let id = match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        _ => return Err(ApiError::BadRequest("Missing record id".to_string())),
    };

    match body.remove("updates") {
        Some(Value::Object(updates)) => Ok((id, updates)),
        Some(_) => Err(ApiError::BadRequest("`updates` must be an object".to_string())),
        None => Ok((id, body)),
    }
}

pub async fn delete_record<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    remove::<T>(&stores, &id).await
}

/// `DELETE` on the collection itself, carrying the id in the body.
pub async fn delete_by_body<T: CollectionRecord>(
    stores: web::Data<Arc<Stores>>,
    request: web::Json<DeleteRequest>,
) -> Result<HttpResponse, ApiError> {
    remove::<T>(&stores, &request.id).await
}

async fn remove<T: CollectionRecord>(stores: &Stores, id: &str) -> Result<HttpResponse, ApiError> {
    T::collection(stores)
        .delete(id)
        .await
        .map_err(|e| ApiError::from_store(e, failed::<T>("delete")))?;

    Ok(HttpResponse::Ok().json(SuccessResponse::ok()))
}

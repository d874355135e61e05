//! Collection store: an ordered set of records persisted as a single document.
//!
//! Every operation is a whole-document read-modify-write. A per-collection
//! mutex serializes those cycles inside one process; nothing coordinates
//! separate processes pointed at the same backend.

pub mod json_file;
pub mod records;
pub mod sqlite;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use shared_types::stored::{CREATED_AT_FIELD, ID_FIELD};
use shared_types::{Company, Interview, PracticeSession, Stored};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub use json_file::JsonFileBackend;
pub use sqlite::SqliteBackend;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{label} not found: {id}")]
    NotFound { label: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Failed to persist {document}: {reason}")]
    PersistFailed {
        document: &'static str,
        reason: String,
    },

    #[error("Document {document} is corrupt: {reason}")]
    Corrupt {
        document: &'static str,
        reason: String,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Names one persisted document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    /// Name of the array field inside the document, also the document's key
    /// in backends that are not file based.
    pub key: &'static str,
    pub file_name: &'static str,
}

/// Persistence engine behind the collections. Backends move whole document
/// bodies and know nothing about records.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn kind(&self) -> &'static str;

    /// Returns `None` when the document has never been written.
    async fn read(&self, document: Document) -> StoreResult<Option<String>>;

    /// Replaces the document. On failure the previous body stays in place.
    async fn write(&self, document: Document, body: String) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}

/// A payload type that can live in a collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const DOCUMENT: Document;

    /// Singular, capitalized, used in messages ("Interview not found").
    const LABEL: &'static str;

    /// Payload fields a partial update may not change, beyond `id` and `createdAt`.
    const IMMUTABLE_FIELDS: &'static [&'static str] = &[];

    fn validate(&self) -> Result<(), String>;
}

pub struct Collection<T> {
    backend: Arc<dyn StorageBackend>,
    create_missing: bool,
    lock: Mutex<()>,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    pub fn new(backend: Arc<dyn StorageBackend>, create_missing: bool) -> Self {
        Self {
            backend,
            create_missing,
            lock: Mutex::new(()),
            _record: PhantomData,
        }
    }

    pub async fn list(&self) -> StoreResult<Vec<Stored<T>>> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    pub async fn get(&self, id: &str) -> StoreResult<Stored<T>> {
        self.list()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or_else(|| not_found::<T>(id))
    }

    pub async fn create(&self, record: T) -> StoreResult<Stored<T>> {
        record.validate().map_err(StoreError::Validation)?;

        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let stored = Stored::new(Uuid::new_v4().to_string(), Utc::now(), record);
        records.push(stored.clone());
        self.save(&records).await?;

        tracing::info!("Created {} {}", T::LABEL, stored.id);
        Ok(stored)
    }

    /// Shallow-merges `patch` over the record: keys present in the patch
    /// replace the stored value, `null` clears an optional field, and absent
    /// keys keep their prior value.
    pub async fn update(&self, id: &str, patch: Map<String, Value>) -> StoreResult<Stored<T>> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let index = records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| not_found::<T>(id))?;

        let merged = merge(&records[index], patch)?;
        merged.record.validate().map_err(StoreError::Validation)?;

        records[index] = merged.clone();
        self.save(&records).await?;

        tracing::info!("Updated {} {}", T::LABEL, id);
        Ok(merged)
    }

    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;

        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(not_found::<T>(id));
        }

        self.save(&records).await?;

        tracing::info!("Deleted {} {}", T::LABEL, id);
        Ok(())
    }

    async fn load(&self) -> StoreResult<Vec<Stored<T>>> {
        let document = T::DOCUMENT;
        match self.backend.read(document).await? {
            Some(body) => {
                let records = parse_document(document, &body)?;
                tracing::debug!("Loaded {} records from {}", records.len(), document.key);
                Ok(records)
            }
            None if self.create_missing => {
                tracing::info!("Document {} not found, creating it empty", document.key);
                self.save(&[]).await?;
                Ok(Vec::new())
            }
            None => Err(StoreError::StorageUnavailable(format!(
                "{} document does not exist",
                document.key
            ))),
        }
    }

    async fn save(&self, records: &[Stored<T>]) -> StoreResult<()> {
        let body = render_document(T::DOCUMENT, records)?;
        self.backend.write(T::DOCUMENT, body).await
    }
}

fn not_found<T: Record>(id: &str) -> StoreError {
    StoreError::NotFound {
        label: T::LABEL,
        id: id.to_string(),
    }
}

fn parse_document<T: DeserializeOwned>(document: Document, body: &str) -> StoreResult<Vec<T>> {
    let corrupt = |reason: String| StoreError::Corrupt {
        document: document.key,
        reason,
    };

    let mut root: Map<String, Value> =
        serde_json::from_str(body).map_err(|e| corrupt(e.to_string()))?;
    let records = root
        .remove(document.key)
        .ok_or_else(|| corrupt(format!("missing `{}` array", document.key)))?;

    serde_json::from_value(records).map_err(|e| corrupt(e.to_string()))
}

fn render_document<T: Serialize>(document: Document, records: &[T]) -> StoreResult<String> {
    let persist_failed = |e: serde_json::Error| StoreError::PersistFailed {
        document: document.key,
        reason: e.to_string(),
    };

    let mut root = Map::new();
    root.insert(
        document.key.to_string(),
        serde_json::to_value(records).map_err(persist_failed)?,
    );

    serde_json::to_string_pretty(&Value::Object(root)).map_err(persist_failed)
}

/// `createdAt` is compared as an instant so `Z` and `+00:00` echo back equal.
fn same_created_at(current: Option<DateTime<Utc>>, value: &Value) -> bool {
    match value {
        Value::Null => current.is_none(),
        other => serde_json::from_value::<DateTime<Utc>>(other.clone())
            .map_or(false, |at| Some(at) == current),
    }
}

fn merge<T: Record>(current: &Stored<T>, patch: Map<String, Value>) -> StoreResult<Stored<T>> {
    let mut fields = match serde_json::to_value(current) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(StoreError::Corrupt {
                document: T::DOCUMENT.key,
                reason: format!("{} {} is not an object", T::LABEL, current.id),
            })
        }
        Err(e) => {
            return Err(StoreError::Corrupt {
                document: T::DOCUMENT.key,
                reason: e.to_string(),
            })
        }
    };

    let mut written = Vec::new();
    let mut cleared = Vec::new();
    for (key, value) in patch {
        if key == CREATED_AT_FIELD {
            if !same_created_at(current.created_at, &value) {
                return Err(StoreError::Validation(format!("`{}` cannot be changed", key)));
            }
            continue;
        }

        if key == ID_FIELD || T::IMMUTABLE_FIELDS.contains(&key.as_str()) {
            if fields.get(&key) != Some(&value) {
                return Err(StoreError::Validation(format!("`{}` cannot be changed", key)));
            }
            continue;
        }

        if value.is_null() {
            cleared.push(key.clone());
        } else {
            written.push(key.clone());
        }
        fields.insert(key, value);
    }

    let mut merged: Stored<T> = serde_json::from_value(Value::Object(fields))
        .map_err(|e| StoreError::Validation(format!("Invalid update: {}", e)))?;

    // A written key must land in the payload, or already exist on the record
    // as an unmodeled field.
    for key in &written {
        if merged.extra.contains_key(key) && !current.extra.contains_key(key) {
            return Err(StoreError::Validation(format!("Unknown field `{}`", key)));
        }
    }

    // Clearing a field that was never stored leaves nothing behind.
    for key in &cleared {
        if !current.extra.contains_key(key) {
            merged.extra.remove(key);
        }
    }

    Ok(merged)
}

/// The three collections the API serves, sharing one backend.
pub struct Stores {
    pub backend: Arc<dyn StorageBackend>,
    pub companies: Collection<Company>,
    pub interviews: Collection<Interview>,
    pub practice: Collection<PracticeSession>,
}

impl Stores {
    pub fn new(backend: Arc<dyn StorageBackend>, create_missing: bool) -> Self {
        Self {
            companies: Collection::new(backend.clone(), create_missing),
            interviews: Collection::new(backend.clone(), create_missing),
            practice: Collection::new(backend.clone(), create_missing),
            backend,
        }
    }
}

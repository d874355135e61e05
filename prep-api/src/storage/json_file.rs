use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Document, StorageBackend, StoreError, StoreResult};

/// Stores each document as a pretty-printed JSON file in one directory.
pub struct JsonFileBackend {
    data_dir: PathBuf,
}

impl JsonFileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, document: Document) -> PathBuf {
        self.data_dir.join(document.file_name)
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    fn kind(&self) -> &'static str {
        "json"
    }

    async fn read(&self, document: Document) -> StoreResult<Option<String>> {
        let path = self.path_for(document);

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                Err(StoreError::StorageUnavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        }
    }

    async fn write(&self, document: Document, body: String) -> StoreResult<()> {
        let data_dir = self.data_dir.clone();
        let path = self.path_for(document);
        let persist_failed = |reason: String| StoreError::PersistFailed {
            document: document.key,
            reason,
        };

        tokio::task::spawn_blocking(move || write_replacing(&data_dir, &path, body.as_bytes()))
            .await
            .map_err(|e| persist_failed(e.to_string()))?
            .map_err(|e| {
                tracing::error!("Failed to write {}: {}", document.file_name, e);
                persist_failed(e.to_string())
            })
    }

    async fn ping(&self) -> StoreResult<()> {
        let metadata = tokio::fs::metadata(&self.data_dir).await.map_err(|e| {
            StoreError::StorageUnavailable(format!("{}: {}", self.data_dir.display(), e))
        })?;

        if !metadata.is_dir() {
            return Err(StoreError::StorageUnavailable(format!(
                "{} is not a directory",
                self.data_dir.display()
            )));
        }
        Ok(())
    }
}

/// Writes to a temporary file next to `path` and renames it into place, so
/// readers only ever see a complete document.
fn write_replacing(data_dir: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir)?;

    let mut file = tempfile::NamedTempFile::new_in(data_dir)?;
    file.write_all(body)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOC: Document = Document {
        key: "things",
        file_name: "things.json",
    };

    #[tokio::test]
    async fn test_read_missing_returns_none() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        assert!(backend.read(DOC).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested"));

        backend.write(DOC, "{\"things\": []}".to_string()).await.unwrap();
        backend.write(DOC, "{\"things\": [1]}".to_string()).await.unwrap();

        let body = backend.read(DOC).await.unwrap().unwrap();
        assert_eq!(body, "{\"things\": [1]}");

        // Only the document itself is left behind, no temporary files.
        let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_unreadable_document() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("things.json")).unwrap();
        let backend = JsonFileBackend::new(dir.path());

        let err = backend.read(DOC).await.unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable(_)));
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_document() {
        let dir = TempDir::new().unwrap();
        let backend = JsonFileBackend::new(dir.path());
        backend.write(DOC, "{\"things\": []}".to_string()).await.unwrap();

        // A directory cannot be replaced by the renamed temporary file.
        let blocked = Document {
            key: "blocked",
            file_name: "blocked",
        };
        std::fs::create_dir(dir.path().join("blocked")).unwrap();
        std::fs::write(dir.path().join("blocked").join("child"), "x").unwrap();

        let err = backend.write(blocked, "{}".to_string()).await.unwrap_err();
        assert!(matches!(err, StoreError::PersistFailed { .. }));
        assert_eq!(
            backend.read(DOC).await.unwrap().unwrap(),
            "{\"things\": []}"
        );
    }

    #[tokio::test]
    async fn test_ping() {
        let dir = TempDir::new().unwrap();
        assert!(JsonFileBackend::new(dir.path()).ping().await.is_ok());
        assert!(JsonFileBackend::new(dir.path().join("absent"))
            .ping()
            .await
            .is_err());
    }
}

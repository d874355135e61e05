use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{StorageBackendKind, StorageConfig};
use crate::storage::{JsonFileBackend, SqliteBackend, StorageBackend, Stores};

/// Returns the directory preptrack keeps its collections in
///
/// # Platform-specific paths
///
/// - **macOS**: `~/Library/Application Support/preptrack`
/// - **Linux**: `~/.local/share/preptrack`
/// - **Windows**: `%LOCALAPPDATA%\preptrack`
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(data_dir.join("preptrack"))
}

/// Resolves the data directory: command line first, then config, then the
/// platform default.
pub fn resolve_data_dir(
    config: &StorageConfig,
    data_dir_override: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    match data_dir_override.or_else(|| config.data_dir.clone()) {
        Some(dir) => Ok(dir),
        None => get_data_dir(),
    }
}

/// Opens the configured backend and builds the collection stores on it
pub fn initialize_stores(config: &StorageConfig, data_dir: PathBuf) -> anyhow::Result<Arc<Stores>> {
    std::fs::create_dir_all(&data_dir)?;

    let backend: Arc<dyn StorageBackend> = match config.backend {
        StorageBackendKind::Json => Arc::new(JsonFileBackend::new(data_dir)),
        StorageBackendKind::Sqlite => {
            Arc::new(SqliteBackend::open(&data_dir.join("preptrack.sqlite3"))?)
        }
    };

    tracing::info!("Using {} storage backend", backend.kind());

    Ok(Arc::new(Stores::new(backend, config.create_missing)))
}

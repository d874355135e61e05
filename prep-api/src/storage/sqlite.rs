use async_trait::async_trait;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

use super::{Document, StorageBackend, StoreError, StoreResult};

/// Keeps every document as one row of a key-value table in an embedded
/// SQLite database.
pub struct SqliteBackend {
    pool: Pool<SqliteConnectionManager>,
}

pub fn run_migrations(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS documents (
            name TEXT PRIMARY KEY,
            body TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )
}

impl SqliteBackend {
    pub fn open(db_path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        });
        let pool = Pool::builder().max_size(4).build(manager)?;

        run_migrations(&*pool.get()?)?;

        Ok(Self { pool })
    }

    async fn with_connection<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || {
            let conn: PooledConnection<SqliteConnectionManager> = pool
                .get()
                .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?;
            f(&conn).map_err(|e| StoreError::StorageUnavailable(e.to_string()))
        })
        .await
        .map_err(|e| StoreError::StorageUnavailable(e.to_string()))?
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    fn kind(&self) -> &'static str {
        "sqlite"
    }

    async fn read(&self, document: Document) -> StoreResult<Option<String>> {
        self.with_connection(move |conn| {
            conn.query_row(
                "SELECT body FROM documents WHERE name = ?1",
                params![document.key],
                |row| row.get(0),
            )
            .optional()
        })
        .await
    }

    async fn write(&self, document: Document, body: String) -> StoreResult<()> {
        let now = chrono::Utc::now().timestamp();

        self.with_connection(move |conn| {
            conn.execute(
                "INSERT INTO documents (name, body, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(name) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
                params![document.key, body, now],
            )
            .map(|_| ())
        })
        .await
        .map_err(|e| {
            tracing::error!("Failed to write document {}: {}", document.key, e);
            StoreError::PersistFailed {
                document: document.key,
                reason: e.to_string(),
            }
        })
    }

    async fn ping(&self) -> StoreResult<()> {
        self.with_connection(|conn| conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0)))
            .await
            .map(|_| ())
    }
}

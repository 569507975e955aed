use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::ensure_dir;
use crate::errors::{HeadlinesError, HeadlinesResult};
use crate::storage::sqlite::seed;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS headlines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    url TEXT NOT NULL,
    published_at TEXT,
    source TEXT NOT NULL,
    source_key TEXT NOT NULL,
    scraped_at TEXT NOT NULL
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_headlines_url_source ON headlines(url, source_key);

CREATE INDEX IF NOT EXISTS idx_headlines_scraped_at ON headlines(scraped_at);
"#;

/// Handle to the headline database. Each call opens its own short-lived connection.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Create the schema (and seed an empty store when `seed` is set).
    ///
    /// If that fails the database file is deleted and initialization is retried
    /// once; a second failure is returned as [`HeadlinesError::StorageInit`].
    pub fn initialize<P: AsRef<Path>>(path: P, seed: bool) -> HeadlinesResult<Self> {
        let storage = Self {
            path: path.as_ref().to_path_buf(),
        };

        if let Err(first) = storage.prepare(seed) {
            warn!(path = %storage.path.display(), error = %first, "Storage initialization failed, recreating database");

            storage.discard().map_err(|e| {
                HeadlinesError::StorageInit(format!("{}; could not remove database: {}", first, e))
            })?;
            storage.prepare(seed).map_err(|second| {
                HeadlinesError::StorageInit(format!("{}; after recreate: {}", first, second))
            })?;

            info!(path = %storage.path.display(), "Database recreated");
        }

        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connection(&self) -> HeadlinesResult<Connection> {
        let conn = Connection::open(&self.path)?;
        register_functions(&conn)?;
        Ok(conn)
    }

    /// Drop every stored headline and start over from a fresh file.
    pub fn reset(&self, seed: bool) -> HeadlinesResult<()> {
        self.discard()?;
        self.prepare(seed)
    }

    fn prepare(&self, seed: bool) -> HeadlinesResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }

        let conn = self.connection()?;
        conn.execute_batch(SCHEMA)?;
        drop(conn);

        if seed {
            seed::seed_if_empty(self)?;
        }

        Ok(())
    }

    fn discard(&self) -> HeadlinesResult<()> {
        for suffix in ["", "-journal", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let file = PathBuf::from(file);
            if file.exists() {
                std::fs::remove_file(&file)?;
            }
        }
        Ok(())
    }
}

/// `unicode_lower(text)`: full Unicode lowercase, unlike the built-in ASCII-only `lower()`.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

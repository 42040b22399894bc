//! SQLite connection pool and schema for the notes store

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;
use thiserror::Error;

/// A pooled connection. Returned to the pool when dropped.
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Failures of note store operations
#[derive(Debug, Error)]
pub enum NoteStoreError {
    /// A required field was missing or blank
    #[error("{0}")]
    Validation(String),

    /// No note with this id
    #[error("Note {0} not found")]
    NotFound(i64),

    /// No connection could be acquired from the pool
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS notes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        created_at TEXT NOT NULL
    );
";

/// Process-wide handle to the notes database
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database file, build the pool and ensure the schema exists
    pub fn new(
        database_url: &str,
        pool_size: u32,
        connection_timeout: Duration,
    ) -> Result<Self, NoteStoreError> {
        let manager = SqliteConnectionManager::file(database_url).with_init(|conn| {
            // Writers from other pooled connections wait instead of failing with SQLITE_BUSY
            conn.busy_timeout(Duration::from_secs(5))
        });

        let pool = Pool::builder()
            .max_size(pool_size)
            .connection_timeout(connection_timeout)
            .build(manager)?;

        let db = Self { pool };
        db.init_schema()?;

        Ok(db)
    }

    fn init_schema(&self) -> Result<(), NoteStoreError> {
        let conn = self.conn()?;

        let mode: String = conn.query_row("PRAGMA journal_mode=WAL", [], |row| row.get(0))?;
        log::debug!("[DB] journal_mode={}", mode);

        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Acquire a connection for the duration of one operation
    pub fn conn(&self) -> Result<DbConn, NoteStoreError> {
        Ok(self.pool.get()?)
    }

    /// Round-trip a trivial query to prove the database is reachable
    pub fn ping(&self) -> Result<(), NoteStoreError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn pool_size(&self) -> u32 {
        self.pool.max_size()
    }
}

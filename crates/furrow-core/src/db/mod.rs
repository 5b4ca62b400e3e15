//! Database access layer with connection pooling and migrations
//!
//! The database is an append-only log of recommendation requests and the
//! ranked crops returned for each:
//! - `recommendations` - request and recommendation logging, history and stats

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod recommendations;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) the database at `path` and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database (for testing)
    ///
    /// Note: Uses a temporary file rather than `:memory:` because every pooled
    /// connection to `:memory:` would see its own empty database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "furrow_test_{}_{}.db",
            std::process::id(),
            id
        ));

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path.to_string_lossy())
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- WAL mode: readers don't block the writer
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;

            -- One row per recommendation request
            CREATE TABLE IF NOT EXISTS farm_requests (
                id INTEGER PRIMARY KEY,
                land_size_ha REAL NOT NULL,
                soil_type TEXT NOT NULL,                   -- sandy, loamy, clay
                crop_preference TEXT NOT NULL,             -- grains, vegetables, fruits
                temperature_c REAL,                        -- NULL when no weather supplied
                rainfall_mm REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_farm_requests_created ON farm_requests(created_at);

            -- Ranked crops returned for a request (append-only)
            CREATE TABLE IF NOT EXISTS recommendations (
                id INTEGER PRIMARY KEY,
                request_id INTEGER NOT NULL REFERENCES farm_requests(id),
                rank INTEGER NOT NULL,                     -- 1 = best
                crop TEXT NOT NULL,
                score REAL NOT NULL,
                rationale TEXT NOT NULL,
                sustainability_score REAL NOT NULL,
                aspects TEXT,                              -- JSON: farmer/market/weather/sustainability
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(request_id, rank)
            );

            CREATE INDEX IF NOT EXISTS idx_recommendations_request ON recommendations(request_id);
            CREATE INDEX IF NOT EXISTS idx_recommendations_crop ON recommendations(crop);
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

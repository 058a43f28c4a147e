// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "MMT_DATABASE_PATH";

const APP_DIR_NAME: &str = "meta-madness-tracker";
const DATABASE_FILE_NAME: &str = "match_series.db";

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u32,
}

impl DatabaseConfig {
    /// Default settings with the application data directory as location
    pub fn new() -> AppResult<Self> {
        Ok(Self::at(get_database_path()?))
    }

    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }

    /// Like `new`, but `MMT_DATABASE_PATH` wins when set
    pub fn from_env() -> AppResult<Self> {
        match std::env::var_os(DATABASE_PATH_ENV) {
            Some(path) if !path.is_empty() => Ok(Self::at(PathBuf::from(path))),
            _ => Self::new(),
        }
    }
}

/// Get the database file path
///
/// Database is stored in the application data directory.
/// Path structure: {APP_DATA}/meta-madness-tracker/match_series.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    Ok(app_data_dir.join(APP_DIR_NAME).join(DATABASE_FILE_NAME))
}

/// Create a connection pool
///
/// - SQLite in WAL mode for better concurrency
/// - Foreign keys enabled
/// - Busy timeout set so concurrent writers to one series wait instead of failing
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = {};",
            busy_timeout_ms
        ))
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::info!("Opened match series database at {}", config.path.display());

    Ok(pool)
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Other(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}

/// Create a single-connection in-memory pool (for testing)
///
/// Every in-memory SQLite connection is its own database, so the pool is capped
/// at one connection to keep all callers on the same data.
pub fn create_test_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create test pool: {}", e)))
}

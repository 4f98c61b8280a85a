//! Error types for the store adapter

use market_common::MarketError;
use thiserror::Error;

/// Errors that can occur when working with the store
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the store configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with connection pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with a query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with a transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),
}

impl From<DbError> for MarketError {
    fn from(err: DbError) -> Self {
        MarketError::Database(err.to_string())
    }
}

//! Error types for the PostgreSQL store.

use thiserror::Error;

/// Errors raised by the store. Both variants are fatal to the run; write
/// failures are re-raised without modification.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not establish or verify the initial connection.
    #[error("bad connection parameters to the database: {0}")]
    Connect(#[source] tokio_postgres::Error),

    /// Query or write failure.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] tokio_postgres::Error),
}

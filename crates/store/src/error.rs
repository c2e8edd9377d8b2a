use thiserror::Error;

/// Failures surfaced by the record store. The store never aborts the
/// process; the boundary decides what a data-access fault means.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening the data source failed (bad path, unreadable file).
    #[error("database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// A statement failed to prepare or execute (malformed SQL,
    /// constraint violation, missing table).
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),
}

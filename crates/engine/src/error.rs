use jobrelay_core::error::CoreError;

/// Failure of the underlying job store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Error returned by [`JobEngine`](crate::JobEngine) operations.
///
/// Validation and not-found failures arrive as [`CoreError`]; everything the
/// store reports is wrapped in [`StoreError`].
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

use midguardians_core::error::CoreError;

/// Error type for repository operations that combine queries with domain
/// checks (snapshot loading, queue reconciliation, alliance registration).
///
/// Plain CRUD repositories return `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

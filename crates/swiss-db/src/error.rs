//! Error types for the data layer.
//!
//! All errors are propagated via [`DbError`], which wraps the underlying
//! [`sqlx`] errors. At the `SwissStore` boundary they are folded into
//! [`StoreError`]: a repeated pair in a round becomes `DuplicateMatch`,
//! other constraint violations become `Rejected`, out-of-range counters
//! become `Inconsistent`, and everything else is `Unavailable`.

use swiss_core::StoreError;

/// Errors that can occur in the data layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A `PostgreSQL` migration failed.
    #[error("PostgreSQL migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The pair already has a match in this numbered round.
    #[error("duplicate match: {0}")]
    DuplicateMatch(String),

    /// A value read from the database does not fit the domain type.
    #[error("value out of range: {0}")]
    OutOfRange(String),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Postgres(sqlx::Error::Database(ref db))
                if db.is_foreign_key_violation()
                    || db.is_check_violation()
                    || db.is_unique_violation() =>
            {
                Self::Rejected {
                    reason: db.to_string(),
                }
            }
            DbError::DuplicateMatch(reason) => Self::DuplicateMatch { reason },
            DbError::OutOfRange(reason) => Self::Inconsistent { reason },
            other => Self::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}

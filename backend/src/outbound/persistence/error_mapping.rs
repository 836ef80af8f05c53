//! Diesel and pool error translation into [`StorageError`].

use tracing::debug;

use crate::domain::ports::StorageError;

use super::pool::PoolError;

/// Map a pool failure into a connection error.
pub(crate) fn map_pool_error(error: PoolError) -> StorageError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    StorageError::connection(message)
}

/// Map a Diesel failure into a query or connection error.
///
/// The database's own message is kept for server-side logs.
pub(crate) fn map_diesel_error(error: diesel::result::Error) -> StorageError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            StorageError::connection(format!("database connection closed: {}", info.message()))
        }
        DieselError::DatabaseError(_, info) => {
            StorageError::query(format!("database error: {}", info.message()))
        }
        DieselError::NotFound => StorageError::query("record not found"),
        other => StorageError::query(other.to_string()),
    }
}

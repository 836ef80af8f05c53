//! Embedded schema migrations.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::StorageError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply every pending migration on a blocking connection.
///
/// Returns the versions that were applied, oldest first.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, StorageError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| StorageError::connection(err.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StorageError::query(format!("migration failed: {err}")))?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    info!(count = applied.len(), "database migrations applied");
    Ok(applied)
}

/// Async wrapper running [`run_pending_migrations`] on the blocking pool.
pub async fn migrate(database_url: &str) -> Result<Vec<String>, StorageError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| StorageError::query(format!("migration task failed: {err}")))?
}

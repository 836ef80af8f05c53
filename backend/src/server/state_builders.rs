//! Storage selection from loaded settings.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::{info, warn};

use crate::domain::ports::{Storage, StorageError};
use crate::outbound::memory::MemoryStorage;
use crate::outbound::persistence::{DbPool, DieselStorage, PoolConfig, PoolError, migrate};
use crate::settings::{AppSettings, SettingsError, StorageBackend};

/// Failures while preparing the storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageSetupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migration(#[from] StorageError),
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// Build the storage adapter selected by `settings`.
///
/// The memory backend needs no external resources. The postgres backend
/// applies pending migrations (unless disabled) and opens a pool; any failure
/// aborts startup rather than falling back to memory.
pub async fn build_storage(settings: &AppSettings) -> Result<Arc<dyn Storage>, StorageSetupError> {
    match settings.storage_backend()? {
        StorageBackend::Memory => {
            warn!("using in-memory storage; bookings are lost on restart");
            Ok(Arc::new(MemoryStorage::new(Arc::new(DefaultClock))))
        }
        StorageBackend::Postgres => {
            let database_url = settings.database_url()?;
            if settings.skip_migrations {
                info!("skipping embedded migrations");
            } else {
                migrate(database_url).await?;
            }
            let config = PoolConfig::new(database_url).with_max_size(settings.pool_max_size()?);
            let pool = DbPool::new(config).await?;
            info!("using postgres storage");
            Ok(Arc::new(DieselStorage::new(pool)))
        }
    }
}

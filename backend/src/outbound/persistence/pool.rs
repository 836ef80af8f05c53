//! bb8 pool of `diesel-async` PostgreSQL connections for the booking store.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

/// Connections opened when no size is configured.
const DEFAULT_MAX_SIZE: u32 = 10;

/// How long a booking request waits for a free connection.
const CHECKOUT_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

/// Pool settings taken from `BOOKINGS_DATABASE_URL` and `BOOKINGS_POOL_MAX_SIZE`.
///
/// ```
/// use bookings::outbound::persistence::PoolConfig;
///
/// let config = PoolConfig::new("postgres://localhost/bookings").with_max_size(4);
/// # let _ = config;
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
}

impl PoolConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Shared handle to the booking database pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool. Connections are opened lazily, so an unreachable
    /// server surfaces on the first checkout rather than here.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let PoolConfig {
            database_url,
            max_size,
        } = config;
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);

        let inner = Pool::builder()
            .max_size(max_size)
            .connection_timeout(CHECKOUT_TIMEOUT)
            .build(manager)
            .await
            .map_err(|err| PoolError::Build {
                message: err.to_string(),
            })?;

        Ok(Self { inner })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when no connection becomes available
    /// within the checkout timeout.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::Checkout {
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unsized_config_uses_default_max() {
        let config = PoolConfig::new("postgres://localhost/bookings");
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
        assert_eq!(config.database_url, "postgres://localhost/bookings");
    }

    #[rstest]
    fn configured_size_wins() {
        assert_eq!(PoolConfig::new("postgres://db/bookings").with_max_size(3).max_size, 3);
    }
}

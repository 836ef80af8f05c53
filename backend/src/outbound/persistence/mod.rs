//! PostgreSQL storage adapter using Diesel with async support.
//!
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module; [`DieselStorage`] translates them into domain types.
//!
//! ```no_run
//! use bookings::outbound::persistence::{DbPool, DieselStorage, PoolConfig, migrate};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! migrate("postgres://localhost/bookings").await?;
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/bookings")).await?;
//! let storage = DieselStorage::new(pool);
//! # let _ = storage;
//! # Ok(())
//! # }
//! ```

mod diesel_storage;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_storage::DieselStorage;
pub use migrations::{migrate, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

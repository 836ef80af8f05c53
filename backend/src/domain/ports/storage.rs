//! Driven port for persisting users and demo bookings.
//!
//! Two adapters implement [`Storage`]: an ephemeral in-process store and a
//! PostgreSQL store. Callers hold an `Arc<dyn Storage>` chosen at startup and
//! never learn which one is active.

use std::num::NonZeroUsize;

use async_trait::async_trait;

use crate::domain::{DemoBooking, DemoBookingDraft, NewUser, User, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Failures raised by storage adapters.
    ///
    /// Messages are for logs only; they never reach HTTP clients.
    pub enum StorageError {
        /// The backing store could not be reached.
        Connection { message: String } => "storage connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "storage query failed: {message}",
    }
}

/// Create and read operations over users and demo bookings.
///
/// ## Invariants
/// - Created records receive a unique id and a creation timestamp that never
///   precedes the previous record's in the same store.
/// - [`Storage::get_demo_bookings`] returns bookings newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a new user and return the stored record.
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError>;

    /// Fetch a user by identifier.
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError>;

    /// Fetch the first user registered under `username`.
    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, StorageError>;

    /// Persist a validated booking, assigning its id and creation time.
    async fn create_demo_booking(
        &self,
        draft: DemoBookingDraft,
    ) -> Result<DemoBooking, StorageError>;

    /// Snapshot of every stored booking, newest first.
    async fn get_demo_bookings(&self) -> Result<Vec<DemoBooking>, StorageError>;

    /// The newest `limit` bookings, newest first.
    ///
    /// Adapters bound the read itself rather than loading every booking.
    async fn get_latest_demo_bookings(
        &self,
        limit: NonZeroUsize,
    ) -> Result<Vec<DemoBooking>, StorageError>;

    /// Confirm the store can currently serve bookings.
    async fn check_connection(&self) -> Result<(), StorageError>;
}

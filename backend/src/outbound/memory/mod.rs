//! Ephemeral in-process storage adapter.
//!
//! [`MemoryStorage`] owns an arena of records keyed by generated ids plus an
//! insertion-order index. Each instance is independent; nothing is shared
//! through module-level state. Contents are lost when the instance drops.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::{Storage, StorageError};
use crate::domain::{BookingId, DemoBooking, DemoBookingDraft, NewUser, User, UserId, Username};

#[derive(Default)]
struct Arena {
    users: HashMap<UserId, User>,
    user_order: Vec<UserId>,
    bookings: HashMap<BookingId, DemoBooking>,
    booking_order: Vec<BookingId>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Arena {
    /// Next creation timestamp, never earlier than the previous one.
    fn stamp(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let created_at = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(created_at);
        created_at
    }
}

/// Storage adapter holding everything in process memory.
///
/// The lock is held only for the duration of one insert or one snapshot and
/// never across an await point.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use bookings::domain::ports::Storage;
/// use bookings::outbound::memory::MemoryStorage;
/// use mockable::DefaultClock;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let storage = MemoryStorage::new(Arc::new(DefaultClock));
/// assert!(storage.get_demo_bookings().await.unwrap().is_empty());
/// # });
/// ```
pub struct MemoryStorage {
    clock: Arc<dyn Clock>,
    arena: RwLock<Arena>,
}

impl MemoryStorage {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            arena: RwLock::new(Arena::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Arena>, StorageError> {
        self.arena
            .read()
            .map_err(|_| StorageError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Arena>, StorageError> {
        self.arena
            .write()
            .map_err(|_| StorageError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_user(&self, user: NewUser) -> Result<User, StorageError> {
        let now = self.clock.utc();
        let mut arena = self.write()?;

        let mut id = UserId::random();
        while arena.users.contains_key(&id) {
            id = UserId::random();
        }
        let created_at = arena.stamp(now);
        let stored = User::new(id, user, created_at);
        arena.users.insert(id, stored.clone());
        arena.user_order.push(id);
        Ok(stored)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>, StorageError> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn get_user_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, StorageError> {
        let arena = self.read()?;
        let found = arena
            .user_order
            .iter()
            .filter_map(|id| arena.users.get(id))
            .find(|user| user.username() == username)
            .cloned();
        Ok(found)
    }

    async fn create_demo_booking(
        &self,
        draft: DemoBookingDraft,
    ) -> Result<DemoBooking, StorageError> {
        let now = self.clock.utc();
        let mut arena = self.write()?;

        let mut id = BookingId::random();
        while arena.bookings.contains_key(&id) {
            id = BookingId::random();
        }
        let created_at = arena.stamp(now);
        let booking = DemoBooking::new(id, draft, created_at);
        arena.bookings.insert(id, booking.clone());
        arena.booking_order.push(id);
        Ok(booking)
    }

    async fn get_demo_bookings(&self) -> Result<Vec<DemoBooking>, StorageError> {
        let arena = self.read()?;
        // Timestamps are clamped monotonic, so reverse insertion order is
        // newest first with ties broken by the later insert.
        let bookings = arena
            .booking_order
            .iter()
            .rev()
            .filter_map(|id| arena.bookings.get(id))
            .cloned()
            .collect();
        Ok(bookings)
    }

    async fn get_latest_demo_bookings(
        &self,
        limit: NonZeroUsize,
    ) -> Result<Vec<DemoBooking>, StorageError> {
        let arena = self.read()?;
        let bookings = arena
            .booking_order
            .iter()
            .rev()
            .take(limit.get())
            .filter_map(|id| arena.bookings.get(id))
            .cloned()
            .collect();
        Ok(bookings)
    }

    async fn check_connection(&self) -> Result<(), StorageError> {
        self.read().map(drop)
    }
}

#[cfg(test)]
mod tests;

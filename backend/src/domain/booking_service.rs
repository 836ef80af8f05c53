//! Demo booking domain service.
//!
//! Implements the booking driving ports over the [`Storage`] port. Storage
//! failures are logged in full here and replaced by generic domain errors so
//! driver text never reaches a client.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::domain::ports::{
    CreateDemoBookingRequest, CreateDemoBookingResponse, DemoBookingCommand, DemoBookingQuery,
    ListDemoBookingsRequest, ListDemoBookingsResponse, Storage, StorageError,
};
use crate::domain::{Error, TraceId};

/// Client-facing message for failed submissions.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create booking";
/// Client-facing message for failed listings.
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch bookings";

fn storage_failure(operation: &'static str, err: StorageError, message: &'static str) -> Error {
    error!(
        operation,
        trace_id = %TraceId::current_log_value(),
        error = %err,
        "booking storage failed"
    );
    Error::internal(message)
}

/// Booking service implementing both command and query ports.
pub struct DemoBookingService<S: ?Sized = dyn Storage> {
    storage: Arc<S>,
}

impl<S: ?Sized> DemoBookingService<S> {
    /// Create a service over the injected storage adapter.
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }
}

impl<S: ?Sized> Clone for DemoBookingService<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

#[async_trait]
impl<S> DemoBookingCommand for DemoBookingService<S>
where
    S: Storage + ?Sized,
{
    async fn create_booking(
        &self,
        request: CreateDemoBookingRequest,
    ) -> Result<CreateDemoBookingResponse, Error> {
        let booking = self
            .storage
            .create_demo_booking(request.draft)
            .await
            .map_err(|err| storage_failure("create_demo_booking", err, CREATE_FAILED_MESSAGE))?;

        debug!(booking_id = %booking.id(), "demo booking stored");
        Ok(CreateDemoBookingResponse { booking })
    }
}

#[async_trait]
impl<S> DemoBookingQuery for DemoBookingService<S>
where
    S: Storage + ?Sized,
{
    async fn list_bookings(
        &self,
        request: ListDemoBookingsRequest,
    ) -> Result<ListDemoBookingsResponse, Error> {
        let bookings = match request.limit {
            Some(limit) => self
                .storage
                .get_latest_demo_bookings(limit)
                .await
                .map_err(|err| {
                    storage_failure("get_latest_demo_bookings", err, LIST_FAILED_MESSAGE)
                })?,
            None => self
                .storage
                .get_demo_bookings()
                .await
                .map_err(|err| storage_failure("get_demo_bookings", err, LIST_FAILED_MESSAGE))?,
        };
        Ok(ListDemoBookingsResponse { bookings })
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;

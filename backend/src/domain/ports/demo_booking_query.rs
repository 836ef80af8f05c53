//! Driving port for reading demo bookings.
//!
//! Inbound adapters list bookings through this port without depending on
//! which storage adapter is active.

use std::num::NonZeroUsize;

use async_trait::async_trait;

use crate::domain::{DemoBooking, Error};

/// Request to list stored bookings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListDemoBookingsRequest {
    /// Keep only the newest `limit` bookings; `None` returns all of them.
    pub limit: Option<NonZeroUsize>,
}

/// Bookings ordered newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDemoBookingsResponse {
    pub bookings: Vec<DemoBooking>,
}

/// Driving port for booking read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoBookingQuery: Send + Sync {
    async fn list_bookings(
        &self,
        request: ListDemoBookingsRequest,
    ) -> Result<ListDemoBookingsResponse, Error>;
}

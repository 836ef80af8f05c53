//! Driving port for demo booking submissions.

use async_trait::async_trait;

use crate::domain::{DemoBooking, DemoBookingDraft, Error};

/// Request to record a validated booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDemoBookingRequest {
    pub draft: DemoBookingDraft,
}

/// Response carrying the stored booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDemoBookingResponse {
    pub booking: DemoBooking,
}

/// Driving port for booking write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoBookingCommand: Send + Sync {
    /// Persist a booking that already passed schema validation.
    ///
    /// Storage failures surface as [`crate::domain::ErrorCode::InternalError`]
    /// with a generic message; the cause is logged, not returned.
    async fn create_booking(
        &self,
        request: CreateDemoBookingRequest,
    ) -> Result<CreateDemoBookingResponse, Error>;
}

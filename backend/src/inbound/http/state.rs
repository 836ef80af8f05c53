//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they stay testable without any storage behind them.

use std::sync::Arc;

use crate::domain::DemoBookingService;
use crate::domain::ports::{DemoBookingCommand, DemoBookingQuery, Storage};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub bookings: Arc<dyn DemoBookingCommand>,
    pub bookings_query: Arc<dyn DemoBookingQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        bookings: Arc<dyn DemoBookingCommand>,
        bookings_query: Arc<dyn DemoBookingQuery>,
    ) -> Self {
        Self {
            bookings,
            bookings_query,
        }
    }

    /// Wire both ports to one [`DemoBookingService`] over `storage`.
    pub fn from_storage(storage: Arc<dyn Storage>) -> Self {
        let service = Arc::new(DemoBookingService::new(storage));
        Self::new(service.clone(), service)
    }
}

//! Domain ports for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod demo_booking_command;
mod demo_booking_query;
mod storage;

#[cfg(test)]
pub use demo_booking_command::MockDemoBookingCommand;
pub use demo_booking_command::{
    CreateDemoBookingRequest, CreateDemoBookingResponse, DemoBookingCommand,
};
#[cfg(test)]
pub use demo_booking_query::MockDemoBookingQuery;
pub use demo_booking_query::{
    DemoBookingQuery, ListDemoBookingsRequest, ListDemoBookingsResponse,
};
#[cfg(test)]
pub use storage::MockStorage;
pub use storage::{Storage, StorageError};

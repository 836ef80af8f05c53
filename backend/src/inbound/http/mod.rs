//! HTTP inbound adapter exposing the bookings REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;

//! Domain types and services for demo bookings.
//!
//! Purpose: hold the booking schema, the user model, the storage port and the
//! service that sits between HTTP handlers and storage. Nothing here knows
//! about actix-web or Diesel.
//!
//! Public surface:
//! - [`DemoBookingDraft`] / [`DemoBooking`]: the validated submission and the
//!   stored record.
//! - [`NewUser`] / [`User`]: user records with Argon2id password hashes.
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failures.
//! - [`DemoBookingService`]: implements the booking driving ports.
//! - [`TraceId`]: request correlation identifier.

pub mod booking;
pub mod booking_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::booking::{
    BookingField, BookingId, BookingValidationError, BookingValidationErrors, DemoBooking,
    DemoBookingDraft, DemoBookingFields, EmailAddress, GradeTier, LearningGoal, PersonName,
    PhoneNumber, Violation,
};
pub use self::booking_service::DemoBookingService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{NewUser, PasswordHash, User, UserId, UserValidationError, Username};

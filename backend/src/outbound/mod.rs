//! Outbound adapters implementing the storage port.
//!
//! - **memory**: ephemeral in-process store
//! - **persistence**: PostgreSQL store using Diesel
//!
//! Adapters translate between domain types and their backing representation
//! and contain no business logic.

pub mod memory;
pub mod persistence;

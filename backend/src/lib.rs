//! Demo booking backend for the tutoring site.
//!
//! Layout follows ports and adapters: `domain` owns validation, records and
//! port traits; `inbound::http` exposes them over Actix; `outbound` provides
//! the in-memory and PostgreSQL storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

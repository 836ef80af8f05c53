//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the booking and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe
//! domain types without coupling them to utoipa.
//!
//! The document backs Swagger UI in debug builds and is exported by the
//! `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::schemas::{
    DemoBookingRequestSchema, DemoBookingSchema, ErrorCodeSchema, ErrorSchema,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookings API",
        description = "Demo class booking submission and listing, plus health checks."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DemoBookingRequestSchema,
        DemoBookingSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "bookings", description = "Demo class bookings"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their JSON
//! shape so the OpenAPI document can describe them from the adapter layer.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No endpoint exists at the requested path.
    #[schema(rename = "not_found")]
    NotFound,
    /// The endpoint does not support the request method.
    #[schema(rename = "method_not_allowed")]
    MethodNotAllowed,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = Error)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message suitable for display.
    #[schema(example = "Name must be at least 2 characters; Please enter a valid email address")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Per-field violations for validation failures; absent otherwise.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for a booking submission body.
#[derive(ToSchema)]
#[schema(as = DemoBookingRequest)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DemoBookingRequestSchema {
    #[schema(min_length = 2, max_length = 100, example = "Asha Rao")]
    name: String,
    #[schema(max_length = 254, example = "asha@example.com")]
    email: String,
    #[schema(min_length = 10, example = "+91 98765 43210")]
    phone: String,
    #[schema(min_length = 1, example = "Grade 9-10")]
    grade: String,
    #[schema(max_length = 2000, example = "Struggling with quadratic equations")]
    message: Option<String>,
}

/// OpenAPI schema for [`crate::domain::DemoBooking`].
#[derive(ToSchema)]
#[schema(as = DemoBooking)]
#[schema(rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct DemoBookingSchema {
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    name: String,
    email: String,
    phone: String,
    grade: String,
    /// `null` when no learning goal was given.
    message: Option<String>,
    #[schema(value_type = String, format = DateTime, example = "2026-01-05T10:00:00Z")]
    created_at: String,
}

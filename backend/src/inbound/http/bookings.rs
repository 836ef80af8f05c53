//! Demo booking API handlers.
//!
//! ```text
//! POST /api/bookings {"name":"Asha Rao","email":"asha@example.com",...}
//! GET  /api/bookings?limit=20
//! ```
//!
//! Any other method on `/api/bookings` is answered with 405, and unknown
//! paths under `/api` with 404, both as JSON error bodies.

use std::num::NonZeroUsize;

use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;
use utoipa::IntoParams;

use crate::domain::ports::{CreateDemoBookingRequest, ListDemoBookingsRequest};
use crate::domain::{DemoBooking, DemoBookingDraft, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DemoBookingRequestSchema, DemoBookingSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::booking_validation_error;

/// Largest page the listing endpoint will return.
pub const MAX_LIST_LIMIT: usize = 500;

/// Query parameters for `GET /api/bookings`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListBookingsQuery {
    /// Return only the newest `limit` bookings (1 to 500).
    #[param(minimum = 1, maximum = 500)]
    pub limit: Option<usize>,
}

fn parse_limit(limit: Option<usize>) -> ApiResult<Option<NonZeroUsize>> {
    match limit {
        None => Ok(None),
        Some(value) if value <= MAX_LIST_LIMIT => NonZeroUsize::new(value)
            .map(Some)
            .ok_or_else(|| limit_out_of_range(value)),
        Some(value) => Err(limit_out_of_range(value)),
    }
}

fn limit_out_of_range(value: usize) -> Error {
    Error::invalid_request(format!("limit must be between 1 and {MAX_LIST_LIMIT}"))
        .with_details(serde_json::json!({ "field": "limit", "value": value, "code": "out_of_range" }))
}

/// Validate and store a demo booking.
///
/// The body is validated against the booking schema before anything touches
/// storage; validation failures list every violated field.
#[utoipa::path(
    post,
    path = "/api/bookings",
    request_body = DemoBookingRequestSchema,
    responses(
        (status = 201, description = "Booking stored", body = DemoBookingSchema),
        (status = 400, description = "Invalid booking", body = ErrorSchema),
        (status = 500, description = "Booking could not be stored", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
pub async fn create_booking(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let draft = DemoBookingDraft::from_payload(&payload).map_err(|errors| {
        debug!(%errors, "booking submission rejected");
        booking_validation_error(&errors)
    })?;

    let response = state
        .bookings
        .create_booking(CreateDemoBookingRequest { draft })
        .await?;
    Ok(HttpResponse::Created().json(response.booking))
}

/// List stored bookings, newest first.
#[utoipa::path(
    get,
    path = "/api/bookings",
    params(ListBookingsQuery),
    responses(
        (status = 200, description = "Stored bookings, newest first", body = [DemoBookingSchema]),
        (status = 400, description = "Invalid query", body = ErrorSchema),
        (status = 500, description = "Bookings could not be read", body = ErrorSchema)
    ),
    tags = ["bookings"],
    operation_id = "listBookings"
)]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    query: web::Query<ListBookingsQuery>,
) -> ApiResult<web::Json<Vec<DemoBooking>>> {
    let limit = parse_limit(query.limit)?;
    let response = state
        .bookings_query
        .list_bookings(ListDemoBookingsRequest { limit })
        .await?;
    Ok(web::Json(response.bookings))
}

/// Fallback for unsupported methods on `/api/bookings`.
pub async fn method_not_allowed() -> ApiResult<HttpResponse> {
    Err(Error::method_not_allowed("Method not allowed"))
}

/// Fallback for unknown paths under `/api`.
pub async fn endpoint_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("Endpoint not found"))
}

/// Register the bookings resource on an `/api` scope.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use bookings::inbound::http::bookings;
///
/// let app = App::new().service(
///     web::scope("/api")
///         .configure(bookings::configure)
///         .default_service(web::to(bookings::endpoint_not_found)),
/// );
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/bookings")
            .route(web::get().to(list_bookings))
            .route(web::post().to(create_booking))
            .default_service(web::to(method_not_allowed)),
    );
}

#[cfg(test)]
mod tests;

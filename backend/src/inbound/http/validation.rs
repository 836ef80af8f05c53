//! Request validation helpers for the HTTP adapter.
//!
//! Everything a client can get wrong before a handler runs (bad JSON, the
//! wrong content type, an oversized body, an unparsable query string) is
//! turned into an `invalid_request` [`Error`] so it renders like every other
//! failure.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use serde_json::{Value, json};
use tracing::debug;

use crate::domain::{BookingValidationErrors, Error};

/// Maximum accepted JSON body size in bytes.
pub const JSON_BODY_LIMIT: usize = 64 * 1024;

/// Render schema violations as one joined message plus per-field details.
///
/// ```
/// use bookings::domain::DemoBookingDraft;
/// use bookings::inbound::http::validation::booking_validation_error;
/// use serde_json::json;
///
/// let errors = DemoBookingDraft::from_payload(&json!({})).unwrap_err();
/// let error = booking_validation_error(&errors);
/// assert!(error.message().contains("Name is required"));
/// ```
pub fn booking_validation_error(errors: &BookingValidationErrors) -> Error {
    let violations: Vec<Value> = errors
        .iter()
        .map(|violation| {
            json!({
                "field": violation.field().key(),
                "code": violation.code(),
                "message": violation.to_string(),
            })
        })
        .collect();
    Error::invalid_request(errors.to_string()).with_details(json!({ "violations": violations }))
}

/// `JsonConfig` error handler.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match &err {
        JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
            format!("Request body must not exceed {JSON_BODY_LIMIT} bytes")
        }
        JsonPayloadError::ContentType => "Request body must be sent as application/json".to_owned(),
        _ => "Request body is not valid JSON".to_owned(),
    };
    debug!(error = %err, "rejected request body");
    Error::invalid_request(message).into()
}

/// `QueryConfig` error handler.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected query string");
    Error::invalid_request("Query parameters are invalid")
        .with_details(json!({ "code": "invalid_query" }))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DemoBookingDraft;
    use rstest::rstest;

    #[rstest]
    fn violations_are_listed_per_field() {
        let errors = DemoBookingDraft::from_payload(&json!({
            "name": "A",
            "email": "bad-email",
            "phone": "123",
            "grade": "",
        }))
        .expect_err("payload is invalid");

        let error = booking_validation_error(&errors);
        let details = error.details().expect("details present");
        let fields: Vec<_> = details["violations"]
            .as_array()
            .expect("violations array")
            .iter()
            .map(|violation| violation["field"].as_str().unwrap_or_default().to_owned())
            .collect();

        assert_eq!(fields, vec!["name", "email", "phone", "grade"]);
        assert_eq!(error.message(), errors.to_string());
    }

    #[rstest]
    #[case(JsonPayloadError::ContentType, "application/json")]
    #[case(JsonPayloadError::Overflow { limit: JSON_BODY_LIMIT }, "must not exceed")]
    fn json_errors_become_bad_requests(#[case] err: JsonPayloadError, #[case] needle: &str) {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let error = json_error_handler(err, &req);
        let response = error.error_response();

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let domain = error
            .as_error::<Error>()
            .expect("handler produces a domain error");
        assert!(domain.message().contains(needle), "{}", domain.message());
    }
}

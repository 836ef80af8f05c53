//! Handler tests for the bookings resource, backed by mocked ports.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test as actix_test, web};
use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::BookingId;
use crate::domain::ports::{
    CreateDemoBookingResponse, ListDemoBookingsResponse, MockDemoBookingCommand,
    MockDemoBookingQuery,
};
use crate::inbound::http::validation::{JSON_BODY_LIMIT, json_error_handler, query_error_handler};

#[fixture]
fn valid_body() -> Value {
    json!({
        "name": "Asha Rao",
        "email": "asha@example.com",
        "phone": "+91 98765 43210",
        "grade": "Grade 9-10",
        "message": "Struggling with quadratic equations",
    })
}

fn stored(body: &Value) -> DemoBooking {
    let draft = DemoBookingDraft::from_payload(body).expect("fixture payload is valid");
    let created_at = Utc
        .with_ymd_and_hms(2026, 1, 5, 10, 0, 0)
        .single()
        .expect("valid timestamp");
    DemoBooking::new(BookingId::random(), draft, created_at)
}

fn test_app(
    command: MockDemoBookingCommand,
    query: MockDemoBookingQuery,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = HttpState::new(Arc::new(command), Arc::new(query));
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api")
            .app_data(
                web::JsonConfig::default()
                    .limit(JSON_BODY_LIMIT)
                    .error_handler(json_error_handler),
            )
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .configure(configure)
            .default_service(web::to(endpoint_not_found)),
    )
}

#[rstest]
#[actix_web::test]
async fn create_returns_201_with_stored_record(valid_body: Value) {
    let booking = stored(&valid_body);
    let expected_id = booking.id().to_string();

    let mut command = MockDemoBookingCommand::new();
    command
        .expect_create_booking()
        .times(1)
        .return_once(move |_| Ok(CreateDemoBookingResponse { booking }));

    let app = actix_test::init_service(test_app(command, MockDemoBookingQuery::new())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(&valid_body)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], json!(expected_id));
    assert_eq!(body["name"], json!("Asha Rao"));
    assert_eq!(body["createdAt"], json!("2026-01-05T10:00:00Z"));
}

#[rstest]
#[actix_web::test]
async fn invalid_body_is_rejected_before_storage() {
    let mut command = MockDemoBookingCommand::new();
    command.expect_create_booking().never();

    let app = actix_test::init_service(test_app(command, MockDemoBookingQuery::new())).await;
    let request = actix_test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({ "name": "A", "email": "bad-email", "phone": "123", "grade": "" }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.contains("Name must be at least 2 characters"));
    assert!(message.contains("Please enter a valid email address"));
    assert!(message.contains("Phone number must be at least 10 characters"));
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[case("{\"name\": ", "application/json", "not valid JSON")]
#[case("name=Asha", "text/plain", "application/json")]
#[actix_web::test]
async fn unparsable_bodies_are_json_400s(
    #[case] raw: &'static str,
    #[case] content_type: &'static str,
    #[case] needle: &str,
) {
    let app = actix_test::init_service(test_app(
        MockDemoBookingCommand::new(),
        MockDemoBookingQuery::new(),
    ))
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/api/bookings")
        .insert_header((header::CONTENT_TYPE, content_type))
        .set_payload(raw)
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    let message = body["message"].as_str().expect("message is a string");
    assert!(message.contains(needle), "{message}");
}

#[rstest]
#[actix_web::test]
async fn oversized_body_is_rejected() {
    let app = actix_test::init_service(test_app(
        MockDemoBookingCommand::new(),
        MockDemoBookingQuery::new(),
    ))
    .await;
    let padding = "x".repeat(JSON_BODY_LIMIT + 1);
    let request = actix_test::TestRequest::post()
        .uri("/api/bookings")
        .set_json(json!({ "message": padding }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn list_passes_limit_to_query(valid_body: Value) {
    let booking = stored(&valid_body);
    let mut query = MockDemoBookingQuery::new();
    query
        .expect_list_bookings()
        .withf(|request| request.limit.map(NonZeroUsize::get) == Some(1))
        .return_once(move |_| {
            Ok(ListDemoBookingsResponse {
                bookings: vec![booking],
            })
        });

    let app = actix_test::init_service(test_app(MockDemoBookingCommand::new(), query)).await;
    let request = actix_test::TestRequest::get()
        .uri("/api/bookings?limit=1")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case("/api/bookings?limit=0")]
#[case("/api/bookings?limit=501")]
#[case("/api/bookings?limit=abc")]
#[actix_web::test]
async fn bad_limits_are_rejected(#[case] uri: &str) {
    let mut query = MockDemoBookingQuery::new();
    query.expect_list_bookings().never();

    let app = actix_test::init_service(test_app(MockDemoBookingCommand::new(), query)).await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], json!("invalid_request"));
}

#[rstest]
#[actix_web::test]
async fn list_failure_is_generic_500() {
    let mut query = MockDemoBookingQuery::new();
    query
        .expect_list_bookings()
        .return_once(|_| Err(Error::internal("Failed to fetch bookings")));

    let app = actix_test::init_service(test_app(MockDemoBookingCommand::new(), query)).await;
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/bookings").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(
        body,
        json!({ "code": "internal_error", "message": "Failed to fetch bookings" })
    );
}

#[rstest]
#[case(actix_test::TestRequest::put())]
#[case(actix_test::TestRequest::delete())]
#[case(actix_test::TestRequest::patch())]
#[actix_web::test]
async fn other_methods_get_405(#[case] request: actix_test::TestRequest) {
    let app = actix_test::init_service(test_app(
        MockDemoBookingCommand::new(),
        MockDemoBookingQuery::new(),
    ))
    .await;
    let response = actix_test::call_service(&app, request.uri("/api/bookings").to_request()).await;

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response
            .headers()
            .get(header::ALLOW)
            .and_then(|value| value.to_str().ok()),
        Some("GET, POST")
    );
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Method not allowed"));
}

#[rstest]
#[case("/api/unknown")]
#[case("/api/bookings/extra")]
#[actix_web::test]
async fn unknown_api_paths_get_404(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(
        MockDemoBookingCommand::new(),
        MockDemoBookingQuery::new(),
    ))
    .await;
    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], json!("Endpoint not found"));
}

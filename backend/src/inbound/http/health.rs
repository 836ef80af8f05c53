//! Liveness and readiness endpoints.
//!
//! Readiness means the listener is bound *and* the booking store answers a
//! connection check, so a postgres outage takes the instance out of rotation
//! while liveness stays green.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use tracing::warn;

use crate::domain::TraceId;
use crate::domain::ports::Storage;

/// Health state shared between the server bootstrap and the handlers.
pub struct HealthState {
    storage: Arc<dyn Storage>,
    accepting: AtomicBool,
    live: AtomicBool,
}

impl HealthState {
    /// Live, not yet accepting traffic, checking readiness against `storage`.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            accepting: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    /// Called once the listener is bound.
    pub fn mark_ready(&self) {
        self.accepting.store(true, Ordering::Release);
    }

    /// Fail liveness while the server drains.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    async fn storage_ready(&self) -> bool {
        if !self.accepting.load(Ordering::Acquire) {
            return false;
        }
        match self.storage.check_connection().await {
            Ok(()) => true,
            Err(err) => {
                warn!(
                    error = %err,
                    trace_id = %TraceId::current_log_value(),
                    "booking storage failed readiness check"
                );
                false
            }
        }
    }
}

fn health_response(ok: bool) -> HttpResponse {
    let mut response = if ok {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .finish()
}

/// 200 when bookings can be taken, 503 before startup completes or while
/// storage is unreachable.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Bookings can be accepted"),
        (status = 503, description = "Starting up or booking storage unreachable")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    health_response(state.storage_ready().await)
}

#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Server is alive"),
        (status = 503, description = "Server is shutting down")
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    health_response(state.live.load(Ordering::Acquire))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockStorage, StorageError};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    fn storage_answering(result: Result<(), StorageError>) -> Arc<dyn Storage> {
        let mut storage = MockStorage::new();
        storage
            .expect_check_connection()
            .returning(move || result.clone());
        Arc::new(storage)
    }

    async fn status_of(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Option<String>) {
        let app = actix_test::init_service(
            App::new().app_data(state).service(ready).service(live),
        )
        .await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        let cache = response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        (response.status(), cache)
    }

    #[rstest]
    #[actix_web::test]
    async fn not_ready_before_listener_is_bound() {
        let mut storage = MockStorage::new();
        storage.expect_check_connection().never();
        let state = web::Data::new(HealthState::new(Arc::new(storage)));

        let (status, cache) = status_of(state, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(cache.as_deref(), Some("no-store"));
    }

    #[rstest]
    #[case(Ok(()), StatusCode::OK)]
    #[case(Err(StorageError::connection("pool timed out")), StatusCode::SERVICE_UNAVAILABLE)]
    #[actix_web::test]
    async fn readiness_follows_storage(
        #[case] check: Result<(), StorageError>,
        #[case] expected: StatusCode,
    ) {
        let state = web::Data::new(HealthState::new(storage_answering(check)));
        state.mark_ready();

        let (status, _) = status_of(state, "/health/ready").await;
        assert_eq!(status, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn liveness_ignores_storage_and_fails_once_draining() {
        let state = web::Data::new(HealthState::new(storage_answering(Err(
            StorageError::connection("down"),
        ))));
        let (status, _) = status_of(state.clone(), "/health/live").await;
        assert_eq!(status, StatusCode::OK);

        state.mark_unhealthy();
        let (status, _) = status_of(state, "/health/live").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}

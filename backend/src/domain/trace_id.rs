//! Correlation identifier for one booking request.
//!
//! The HTTP edge resolves a [`TraceId`] from the `trace-id` header (or mints
//! one) and runs the handler inside [`TraceId::scope`]. Domain errors and
//! storage-failure logs read it back with [`TraceId::current`].
//!
//! Tokio task-locals do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] again if it must stay correlated.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Request and response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Log value used when no request is in scope.
const NO_TRACE: &str = "-";

task_local! {
    static TRACE_ID: TraceId;
}

/// UUID correlating a booking request with its logs and error body.
///
/// # Examples
/// ```
/// use bookings::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let trace_id = TraceId::from_header(Some("11111111-1111-1111-1111-111111111111"));
/// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(trace_id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Reuse a well-formed incoming header value, otherwise mint a new id.
    ///
    /// Malformed values are dropped rather than echoed back to the client.
    #[must_use]
    pub fn from_header(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// The identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// [`TraceId::current`] rendered for a log field, `-` outside a request.
    #[must_use]
    pub fn current_log_value() -> String {
        Self::current().map_or_else(|| NO_TRACE.to_owned(), |id| id.to_string())
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

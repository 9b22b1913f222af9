//! Public tracking lookup.
//!
//! The only read path exposed to unauthenticated callers: a tracking
//! number in, the courier and its history out.

use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use tracing::instrument;

use parceltrace_courier::application::query_handlers::{self, TrackingView};

use crate::error::ApiError;
use crate::state::AppState;

/// Query string for GET /.
#[derive(Debug, Deserialize)]
pub struct TrackingQuery {
    /// The tracking number to look up. Surrounding whitespace is ignored.
    #[serde(default)]
    pub tracking_number: Option<String>,
}

/// GET /?tracking_number=CTR-XXXXXX
#[instrument(skip(state))]
async fn track(
    State(state): State<AppState>,
    Query(query): Query<TrackingQuery>,
) -> Result<Json<TrackingView>, ApiError> {
    let token = query.tracking_number.unwrap_or_default();
    let view = query_handlers::track_courier(&token, &*state.repository).await?;
    Ok(Json(view))
}

/// Returns the public tracking router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(track))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use http_body_util::BodyExt;
    use parceltrace_core::clock::Clock;
    use parceltrace_core::rng::{SystemTokenRng, TokenRng};
    use parceltrace_test_support::{
        FixedClock, InMemoryCourierRepository, RecordingReceiptNotifier,
    };
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    use super::*;

    fn test_app_state() -> AppState {
        let clock: Arc<dyn Clock> =
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()));
        let rng: Arc<Mutex<dyn TokenRng>> = Arc::new(Mutex::new(SystemTokenRng));
        AppState::new(
            Arc::new(InMemoryCourierRepository::new()),
            clock,
            rng,
            Arc::new(RecordingReceiptNotifier::new()),
        )
    }

    #[tokio::test]
    async fn test_missing_tracking_number_returns_400() {
        // Arrange
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("GET")
            .uri("/")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_unknown_tracking_number_returns_404_with_message() {
        // Arrange
        let app = router().with_state(test_app_state());
        let request = Request::builder()
            .method("GET")
            .uri("/?tracking_number=CTR-NOSUCH")
            .body(Body::empty())
            .unwrap();

        // Act
        let response = app.oneshot(request).await.unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "tracking_number_not_found");
        assert_eq!(
            json["message"],
            "Tracking number 'CTR-NOSUCH' was not found."
        );
    }
}

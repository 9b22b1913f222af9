//! ParcelTrace — API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parceltrace_core::error::DomainError;
use parceltrace_notify::NotificationError;
use serde::Serialize;
use thiserror::Error;

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer error wrapper that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An error from the courier domain or its store.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A receipt could not be delivered.
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = match &self {
            Self::Domain(domain) => match domain {
                DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
                DomainError::CourierNotFound(_) => (StatusCode::NOT_FOUND, "courier_not_found"),
                DomainError::TrackingNumberNotFound(_) => {
                    (StatusCode::NOT_FOUND, "tracking_number_not_found")
                }
                DomainError::TrackingNumberConflict(_) => {
                    (StatusCode::CONFLICT, "tracking_number_conflict")
                }
                DomainError::AllocationExhausted { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "allocation_exhausted")
                }
                DomainError::Infrastructure(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
                }
            },
            Self::Notification(_) => (StatusCode::BAD_GATEWAY, "notification_failed"),
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use uuid::Uuid;

    fn status_of(err: ApiError) -> StatusCode {
        let response = err.into_response();
        response.status()
    }

    #[test]
    fn test_validation_maps_to_400() {
        assert_eq!(
            status_of(DomainError::Validation("bad input".into()).into()),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_courier_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::CourierNotFound(Uuid::new_v4()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_tracking_number_not_found_maps_to_404() {
        assert_eq!(
            status_of(DomainError::TrackingNumberNotFound("CTR-NOSUCH".into()).into()),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_conflict_maps_to_409() {
        assert_eq!(
            status_of(DomainError::TrackingNumberConflict("CTR-ABC123".into()).into()),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_allocation_exhausted_maps_to_503() {
        assert_eq!(
            status_of(DomainError::AllocationExhausted { attempts: 10 }.into()),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_infrastructure_maps_to_500() {
        assert_eq!(
            status_of(DomainError::Infrastructure("db down".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_notification_failure_maps_to_502() {
        let err = NotificationError::Delivery {
            recipient: "amina.diallo@example.com".into(),
            reason: "smtp connection refused".into(),
        };
        assert_eq!(status_of(err.into()), StatusCode::BAD_GATEWAY);
    }
}

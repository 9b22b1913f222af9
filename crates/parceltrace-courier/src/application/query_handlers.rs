//! Query handlers for the courier context.
//!
//! Read-only views over persisted couriers and their tracking history,
//! including the public tracking lookup.

use parceltrace_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::courier::{Courier, CourierStatus, Package, Party, ShippingDocument};
use crate::domain::history::HistoryEntry;
use crate::repository::CourierRepository;

/// Read-only view of a courier.
#[derive(Debug, Serialize)]
pub struct CourierView {
    pub id: Uuid,
    pub tracking_number: String,
    pub status: CourierStatus,
    pub current_location_country: Option<String>,
    pub current_location_city: Option<String>,
    pub shipping: ShippingDocument,
    pub receiver: Party,
    pub sender: Party,
    pub package: Package,
    pub date_sent: NaiveDate,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CourierView {
    /// Builds the view from a persisted courier.
    #[must_use]
    pub fn from_courier(courier: &Courier) -> Self {
        Self {
            id: courier.id,
            tracking_number: courier.tracking_number.clone(),
            status: courier.status,
            current_location_country: courier.current_location_country.clone(),
            current_location_city: courier.current_location_city.clone(),
            shipping: courier.shipping.clone(),
            receiver: courier.receiver.clone(),
            sender: courier.sender.clone(),
            package: courier.package.clone(),
            date_sent: courier.date_sent,
            estimated_delivery_date: courier.estimated_delivery_date,
            created_at: courier.created_at,
            updated_at: courier.updated_at,
        }
    }
}

/// Read-only view of one history entry.
#[derive(Debug, Serialize)]
pub struct HistoryEntryView {
    pub status: CourierStatus,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntryView {
    fn from_entry(entry: &HistoryEntry) -> Self {
        Self {
            status: entry.status,
            location_country: entry.location_country.clone(),
            location_city: entry.location_city.clone(),
            description: entry.description.clone(),
            recorded_at: entry.recorded_at,
        }
    }
}

/// The public tracking-page payload: courier plus full history, most
/// recent entry first.
#[derive(Debug, Serialize)]
pub struct TrackingView {
    pub courier: CourierView,
    pub history: Vec<HistoryEntryView>,
}

/// Retrieves a courier by its internal identifier.
///
/// # Errors
///
/// Returns `DomainError::CourierNotFound` for an unknown identifier.
pub async fn get_courier_by_id(
    id: Uuid,
    repo: &dyn CourierRepository,
) -> Result<CourierView, DomainError> {
    let Some(courier) = repo.find_by_id(id).await? else {
        return Err(DomainError::CourierNotFound(id));
    };
    Ok(CourierView::from_courier(&courier))
}

/// Retrieves a courier's history, most recent entry first.
///
/// # Errors
///
/// Returns `DomainError::CourierNotFound` for an unknown identifier.
pub async fn get_courier_history(
    id: Uuid,
    repo: &dyn CourierRepository,
) -> Result<Vec<HistoryEntryView>, DomainError> {
    if repo.find_by_id(id).await?.is_none() {
        return Err(DomainError::CourierNotFound(id));
    }
    let entries = repo.list_history(id).await?;
    Ok(entries.iter().map(HistoryEntryView::from_entry).collect())
}

/// Resolves a tracking number to its courier and history.
///
/// The input is trimmed before lookup; this is the only read path exposed
/// to unauthenticated callers.
///
/// # Errors
///
/// Returns `DomainError::Validation` for an empty tracking number and
/// `DomainError::TrackingNumberNotFound` when no courier matches.
pub async fn track_courier(
    tracking_number: &str,
    repo: &dyn CourierRepository,
) -> Result<TrackingView, DomainError> {
    let token = tracking_number.trim();
    if token.is_empty() {
        return Err(DomainError::Validation(
            "tracking_number must not be empty".to_owned(),
        ));
    }

    let Some(courier) = repo.find_by_tracking_number(token).await? else {
        return Err(DomainError::TrackingNumberNotFound(token.to_owned()));
    };
    let history = repo.list_history(courier.id).await?;

    Ok(TrackingView {
        courier: CourierView::from_courier(&courier),
        history: history.iter().map(HistoryEntryView::from_entry).collect(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use parceltrace_test_support::{
        InMemoryCourierRepository, SteppingClock, sample_courier,
    };
    use uuid::Uuid;

    use crate::audit;

    use super::*;

    #[tokio::test]
    async fn test_track_courier_trims_surrounding_whitespace() {
        // Arrange
        let repo = InMemoryCourierRepository::new();
        repo.insert_courier(&sample_courier("CTR-TEST01")).await.unwrap();

        // Act
        let view = track_courier("  CTR-TEST01  ", &repo).await.unwrap();

        // Assert
        assert_eq!(view.courier.tracking_number, "CTR-TEST01");
    }

    #[tokio::test]
    async fn test_track_courier_rejects_empty_input() {
        // Arrange
        let repo = InMemoryCourierRepository::new();

        // Act
        let result = track_courier("   ", &repo).await;

        // Assert
        assert!(matches!(result.unwrap_err(), DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_track_courier_reports_unknown_token() {
        // Arrange
        let repo = InMemoryCourierRepository::new();

        // Act
        let result = track_courier("CTR-NOSUCH", &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::TrackingNumberNotFound(token) => assert_eq!(token, "CTR-NOSUCH"),
            other => panic!("expected TrackingNumberNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_track_courier_returns_history_most_recent_first() {
        // Arrange: three entries at strictly increasing timestamps.
        let repo = InMemoryCourierRepository::new();
        let clock = SteppingClock::new(
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            Duration::minutes(5),
        );
        let courier = sample_courier("CTR-TEST01");
        repo.insert_courier(&courier).await.unwrap();
        audit::record_creation(&courier, &clock, &repo).await.unwrap();

        let mut moved = courier.clone();
        moved.current_location_city = Some("Lyon".to_owned());
        audit::record_update(&moved, &clock, &repo).await.unwrap();
        moved.current_location_city = Some("Marseille".to_owned());
        audit::record_update(&moved, &clock, &repo).await.unwrap();

        // Act
        let view = track_courier("CTR-TEST01", &repo).await.unwrap();

        // Assert
        let timestamps: Vec<_> = view.history.iter().map(|e| e.recorded_at).collect();
        assert_eq!(view.history.len(), 3);
        assert!(timestamps[0] > timestamps[1]);
        assert!(timestamps[1] > timestamps[2]);
        assert_eq!(view.history[0].location_city.as_deref(), Some("Marseille"));
    }

    #[tokio::test]
    async fn test_get_courier_history_requires_existing_courier() {
        // Arrange
        let repo = InMemoryCourierRepository::new();

        // Act
        let result = get_courier_history(Uuid::new_v4(), &repo).await;

        // Assert
        assert!(matches!(result.unwrap_err(), DomainError::CourierNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_courier_by_id_returns_view() {
        // Arrange
        let repo = InMemoryCourierRepository::new();
        let courier = sample_courier("CTR-TEST01");
        repo.insert_courier(&courier).await.unwrap();

        // Act
        let view = get_courier_by_id(courier.id, &repo).await.unwrap();

        // Assert
        assert_eq!(view.id, courier.id);
        assert_eq!(view.tracking_number, "CTR-TEST01");
        assert_eq!(view.status, courier.status);
    }
}

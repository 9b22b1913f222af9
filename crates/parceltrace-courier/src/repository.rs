//! Courier repository abstraction.

use async_trait::async_trait;
use parceltrace_core::error::DomainError;
use uuid::Uuid;

use crate::domain::courier::Courier;
use crate::domain::history::{HistoryEntry, NewHistoryEntry};

/// Repository trait for couriers and their tracking history.
///
/// Implementations must enforce a uniqueness constraint on
/// `tracking_number` at write time; the allocator's existence pre-check is
/// best effort and loses races.
#[async_trait]
pub trait CourierRepository: Send + Sync {
    /// Inserts a new courier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TrackingNumberConflict` if the tracking number
    /// is already taken, `DomainError::Infrastructure` on store failure.
    async fn insert_courier(&self, courier: &Courier) -> Result<(), DomainError>;

    /// Persists changes to an existing courier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CourierNotFound` if the courier does not exist.
    async fn update_courier(&self, courier: &Courier) -> Result<(), DomainError>;

    /// Looks up a courier by its internal identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Courier>, DomainError>;

    /// Looks up a courier by its tracking number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Courier>, DomainError>;

    /// Returns whether any courier already holds the given tracking number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn tracking_number_exists(&self, tracking_number: &str) -> Result<bool, DomainError>;

    /// Returns the most recent history entry for a courier, ordered by
    /// `recorded_at` with the entry id as tie-break.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn latest_history(&self, courier_id: Uuid) -> Result<Option<HistoryEntry>, DomainError>;

    /// Returns all history entries for a courier, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn list_history(&self, courier_id: Uuid) -> Result<Vec<HistoryEntry>, DomainError>;

    /// Appends a history entry and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on store failure.
    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, DomainError>;
}

//! Tracking history entries.
//!
//! Entries are immutable once written. A courier owns an ordered sequence
//! of entries, retrieved most recent first; the store-assigned `id` is a
//! monotonic tie-break for entries sharing a timestamp.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::courier::CourierStatus;

/// Description recorded on the entry written at courier creation.
pub const COURIER_CREATED: &str = "Courier created";

/// Description recorded on entries written for significant updates.
pub const COURIER_DETAILS_UPDATED: &str = "Courier details updated";

/// One immutable audit record capturing a courier's state at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Store-assigned monotonic identifier; tie-break within a timestamp.
    pub id: i64,
    pub courier_id: Uuid,
    pub status: CourierStatus,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

/// A history entry before the store has assigned its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub courier_id: Uuid,
    pub status: CourierStatus,
    pub location_country: Option<String>,
    pub location_city: Option<String>,
    pub description: String,
    pub recorded_at: DateTime<Utc>,
}

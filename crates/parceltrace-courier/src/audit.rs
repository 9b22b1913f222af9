//! Post-commit history hooks.
//!
//! The write path calls one of these immediately after a courier write is
//! durably committed. Failures here are the caller's to log and swallow:
//! history is auxiliary data and must never roll back the courier write.

use parceltrace_core::clock::Clock;
use parceltrace_core::error::DomainError;

use crate::domain::courier::Courier;
use crate::domain::history::{
    COURIER_CREATED, COURIER_DETAILS_UPDATED, HistoryEntry, NewHistoryEntry,
};
use crate::repository::CourierRepository;

/// Decides whether a committed update warrants a fresh history entry.
///
/// True when status or either location field differs from the most recent
/// entry, or when an estimated delivery date is set and differs from the
/// date component of that entry's `recorded_at`. The delivery-date clause
/// compares against the previous entry's write time rather than a stored
/// delivery estimate, so once a delivery date is set nearly every save
/// produces an entry; this quirk is load-bearing for existing consumers and
/// is kept deliberately (see DESIGN.md).
#[must_use]
pub fn update_warrants_entry(courier: &Courier, last: &HistoryEntry) -> bool {
    if last.status != courier.status
        || last.location_country != courier.current_location_country
        || last.location_city != courier.current_location_city
    {
        return true;
    }
    courier
        .estimated_delivery_date
        .is_some_and(|eta| last.recorded_at.date_naive() != eta)
}

fn snapshot(courier: &Courier, description: &str, clock: &dyn Clock) -> NewHistoryEntry {
    NewHistoryEntry {
        courier_id: courier.id,
        status: courier.status,
        location_country: courier.current_location_country.clone(),
        location_city: courier.current_location_city.clone(),
        description: description.to_owned(),
        recorded_at: clock.now(),
    }
}

/// Records the unconditional creation entry for a newly committed courier.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the insert fails.
pub async fn record_creation(
    courier: &Courier,
    clock: &dyn Clock,
    repo: &dyn CourierRepository,
) -> Result<HistoryEntry, DomainError> {
    repo.append_history(snapshot(courier, COURIER_CREATED, clock))
        .await
}

/// Records an update entry if the committed state warrants one.
///
/// Returns `None` when the write changed nothing the history tracks.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if reading the latest entry or
/// inserting the new one fails.
pub async fn record_update(
    courier: &Courier,
    clock: &dyn Clock,
    repo: &dyn CourierRepository,
) -> Result<Option<HistoryEntry>, DomainError> {
    let warranted = match repo.latest_history(courier.id).await? {
        None => true,
        Some(last) => update_warrants_entry(courier, &last),
    };
    if !warranted {
        return Ok(None);
    }
    let entry = repo
        .append_history(snapshot(courier, COURIER_DETAILS_UPDATED, clock))
        .await?;
    Ok(Some(entry))
}

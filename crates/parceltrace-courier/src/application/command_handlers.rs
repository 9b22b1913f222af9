//! Command handlers for the courier context.
//!
//! Each handler orchestrates one write: validate, persist, then invoke the
//! history hook against the committed state. History failures are logged
//! and swallowed here — the courier write has already been committed and
//! history is best-effort auxiliary data.

use parceltrace_core::clock::Clock;
use parceltrace_core::error::DomainError;
use parceltrace_core::rng::TokenRng;
use tracing::warn;
use uuid::Uuid;

use crate::allocator::{self, MAX_ALLOCATION_ATTEMPTS};
use crate::audit;
use crate::domain::commands::{CreateCourier, UpdateCourier};
use crate::domain::courier::Courier;
use crate::domain::history::HistoryEntry;
use crate::domain::validate::validate_courier;
use crate::repository::CourierRepository;

/// Result of a successfully handled courier command.
#[derive(Debug)]
pub struct CourierCommandResult {
    /// The courier as committed.
    pub courier: Courier,
    /// The history entry recorded for this write, if any.
    pub history: Option<HistoryEntry>,
}

/// Inserts the courier under a freshly allocated tracking number, retrying
/// with a new token when the store reports a commit-time collision.
async fn persist_with_unique_tracking_number(
    courier: &mut Courier,
    rng: &mut dyn TokenRng,
    repo: &dyn CourierRepository,
) -> Result<(), DomainError> {
    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        courier.tracking_number = allocator::allocate(rng, repo).await?;
        match repo.insert_courier(courier).await {
            Ok(()) => return Ok(()),
            // Lost the race against a concurrent creation between the
            // pre-check and the insert; the constraint is authoritative.
            Err(DomainError::TrackingNumberConflict(_)) => {}
            Err(other) => return Err(other),
        }
    }
    Err(DomainError::AllocationExhausted {
        attempts: MAX_ALLOCATION_ATTEMPTS,
    })
}

fn record_or_warn(courier_id: Uuid, result: Result<Option<HistoryEntry>, DomainError>) -> Option<HistoryEntry> {
    match result {
        Ok(entry) => entry,
        Err(error) => {
            warn!(
                courier_id = %courier_id,
                error = %error,
                "failed to record tracking history; courier write is already committed"
            );
            None
        }
    }
}

/// Handles the `CreateCourier` command: validates the fields, persists the
/// courier under a unique tracking number, and records the creation entry.
///
/// # Errors
///
/// Returns `DomainError::Validation` for malformed fields,
/// `DomainError::AllocationExhausted` when no unique tracking number could
/// be committed within the attempt bound, or an infrastructure error from
/// the store.
pub async fn handle_create_courier(
    command: &CreateCourier,
    clock: &dyn Clock,
    rng: &mut dyn TokenRng,
    repo: &dyn CourierRepository,
) -> Result<CourierCommandResult, DomainError> {
    let now = clock.now();
    let mut courier = Courier::from_parts(Uuid::new_v4(), String::new(), command.fields.clone(), now);
    validate_courier(&courier)?;

    persist_with_unique_tracking_number(&mut courier, rng, repo).await?;

    let history = record_or_warn(
        courier.id,
        audit::record_creation(&courier, clock, repo).await.map(Some),
    );

    Ok(CourierCommandResult { courier, history })
}

/// Handles the `UpdateCourier` command: loads the courier, applies the
/// patch, persists it, and records a history entry when the change is
/// significant.
///
/// # Errors
///
/// Returns `DomainError::CourierNotFound` for an unknown courier,
/// `DomainError::Validation` for malformed fields, or an infrastructure
/// error from the store.
pub async fn handle_update_courier(
    command: &UpdateCourier,
    clock: &dyn Clock,
    repo: &dyn CourierRepository,
) -> Result<CourierCommandResult, DomainError> {
    let Some(mut courier) = repo.find_by_id(command.courier_id).await? else {
        return Err(DomainError::CourierNotFound(command.courier_id));
    };

    command.update.apply(&mut courier);
    validate_courier(&courier)?;
    courier.updated_at = clock.now();

    repo.update_courier(&courier).await?;

    let history = record_or_warn(courier.id, audit::record_update(&courier, clock, repo).await);

    Ok(CourierCommandResult { courier, history })
}

//! Test repositories — in-memory and failing `CourierRepository`
//! implementations.

use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use parceltrace_core::error::DomainError;
use parceltrace_courier::domain::courier::Courier;
use parceltrace_courier::domain::history::{HistoryEntry, NewHistoryEntry};
use parceltrace_courier::repository::CourierRepository;
use uuid::Uuid;

/// An in-memory courier repository.
///
/// Enforces the tracking-number uniqueness constraint the same way the real
/// store does, and assigns monotonically increasing history entry ids, so
/// allocator retries and history ordering behave as in production.
#[derive(Debug, Default)]
pub struct InMemoryCourierRepository {
    couriers: Mutex<Vec<Courier>>,
    history: Mutex<Vec<HistoryEntry>>,
    next_history_id: AtomicI64,
    fail_history_appends: bool,
    skip_existence_checks: bool,
}

impl InMemoryCourierRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `append_history` call fail with an infrastructure error,
    /// while courier reads and writes keep working. Used to test that
    /// history is best-effort.
    #[must_use]
    pub fn with_failing_history_appends(mut self) -> Self {
        self.fail_history_appends = true;
        self
    }

    /// Makes `tracking_number_exists` always report `false`, simulating an
    /// allocator pre-check that races ahead of a concurrent insert. The
    /// uniqueness constraint on insert stays active, so collisions surface
    /// as commit-time conflicts.
    #[must_use]
    pub fn with_unchecked_existence(mut self) -> Self {
        self.skip_existence_checks = true;
        self
    }

    /// Returns the number of stored couriers.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn courier_count(&self) -> usize {
        self.couriers.lock().unwrap().len()
    }
}

#[async_trait]
impl CourierRepository for InMemoryCourierRepository {
    async fn insert_courier(&self, courier: &Courier) -> Result<(), DomainError> {
        let mut couriers = self.couriers.lock().unwrap();
        if couriers
            .iter()
            .any(|c| c.tracking_number == courier.tracking_number)
        {
            return Err(DomainError::TrackingNumberConflict(
                courier.tracking_number.clone(),
            ));
        }
        couriers.push(courier.clone());
        Ok(())
    }

    async fn update_courier(&self, courier: &Courier) -> Result<(), DomainError> {
        let mut couriers = self.couriers.lock().unwrap();
        let Some(stored) = couriers.iter_mut().find(|c| c.id == courier.id) else {
            return Err(DomainError::CourierNotFound(courier.id));
        };
        *stored = courier.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Courier>, DomainError> {
        Ok(self
            .couriers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Courier>, DomainError> {
        Ok(self
            .couriers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.tracking_number == tracking_number)
            .cloned())
    }

    async fn tracking_number_exists(&self, tracking_number: &str) -> Result<bool, DomainError> {
        if self.skip_existence_checks {
            return Ok(false);
        }
        Ok(self
            .couriers
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.tracking_number == tracking_number))
    }

    async fn latest_history(&self, courier_id: Uuid) -> Result<Option<HistoryEntry>, DomainError> {
        Ok(self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.courier_id == courier_id)
            .max_by_key(|e| (e.recorded_at, e.id))
            .cloned())
    }

    async fn list_history(&self, courier_id: Uuid) -> Result<Vec<HistoryEntry>, DomainError> {
        let mut entries: Vec<HistoryEntry> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.courier_id == courier_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse((e.recorded_at, e.id)));
        Ok(entries)
    }

    async fn append_history(&self, entry: NewHistoryEntry) -> Result<HistoryEntry, DomainError> {
        if self.fail_history_appends {
            return Err(DomainError::Infrastructure(
                "history store unavailable".to_owned(),
            ));
        }
        let id = self.next_history_id.fetch_add(1, Ordering::SeqCst) + 1;
        let entry = HistoryEntry {
            id,
            courier_id: entry.courier_id,
            status: entry.status,
            location_country: entry.location_country,
            location_city: entry.location_city,
            description: entry.description,
            recorded_at: entry.recorded_at,
        };
        self.history.lock().unwrap().push(entry.clone());
        Ok(entry)
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingCourierRepository;

fn connection_refused() -> DomainError {
    DomainError::Infrastructure("connection refused".to_owned())
}

#[async_trait]
impl CourierRepository for FailingCourierRepository {
    async fn insert_courier(&self, _courier: &Courier) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn update_courier(&self, _courier: &Courier) -> Result<(), DomainError> {
        Err(connection_refused())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Courier>, DomainError> {
        Err(connection_refused())
    }

    async fn find_by_tracking_number(
        &self,
        _tracking_number: &str,
    ) -> Result<Option<Courier>, DomainError> {
        Err(connection_refused())
    }

    async fn tracking_number_exists(&self, _tracking_number: &str) -> Result<bool, DomainError> {
        Err(connection_refused())
    }

    async fn latest_history(
        &self,
        _courier_id: Uuid,
    ) -> Result<Option<HistoryEntry>, DomainError> {
        Err(connection_refused())
    }

    async fn list_history(&self, _courier_id: Uuid) -> Result<Vec<HistoryEntry>, DomainError> {
        Err(connection_refused())
    }

    async fn append_history(&self, _entry: NewHistoryEntry) -> Result<HistoryEntry, DomainError> {
        Err(connection_refused())
    }
}

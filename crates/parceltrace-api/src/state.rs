//! Shared application state.

use std::sync::Arc;

use parceltrace_core::clock::Clock;
use parceltrace_core::rng::TokenRng;
use parceltrace_courier::repository::CourierRepository;
use parceltrace_notify::ReceiptNotifier;
use tokio::sync::Mutex;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Courier and history store.
    pub repository: Arc<dyn CourierRepository>,
    /// Time source for timestamps and history entries.
    pub clock: Arc<dyn Clock>,
    /// Random source for tracking-number allocation.
    pub rng: Arc<Mutex<dyn TokenRng>>,
    /// Delivery side for waybill receipts.
    pub notifier: Arc<dyn ReceiptNotifier>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        repository: Arc<dyn CourierRepository>,
        clock: Arc<dyn Clock>,
        rng: Arc<Mutex<dyn TokenRng>>,
        notifier: Arc<dyn ReceiptNotifier>,
    ) -> Self {
        Self {
            repository,
            clock,
            rng,
            notifier,
        }
    }
}

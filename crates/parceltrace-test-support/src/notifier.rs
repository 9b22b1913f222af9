//! Test notifiers — mock `ReceiptNotifier` implementations.

use std::sync::Mutex;

use async_trait::async_trait;
use parceltrace_notify::{NotificationError, ReceiptData, ReceiptNotifier};

/// A notifier that records every receipt it is asked to deliver and always
/// succeeds.
#[derive(Debug, Default)]
pub struct RecordingReceiptNotifier {
    sent: Mutex<Vec<ReceiptData>>,
}

impl RecordingReceiptNotifier {
    /// Creates a new recording notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all receipts sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sent_receipts(&self) -> Vec<ReceiptData> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReceiptNotifier for RecordingReceiptNotifier {
    async fn send_receipt(&self, receipt: &ReceiptData) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(receipt.clone());
        Ok(())
    }
}

/// A notifier whose transport always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingReceiptNotifier;

#[async_trait]
impl ReceiptNotifier for FailingReceiptNotifier {
    async fn send_receipt(&self, receipt: &ReceiptData) -> Result<(), NotificationError> {
        Err(NotificationError::Delivery {
            recipient: receipt.receiver_email.clone(),
            reason: "smtp connection refused".to_owned(),
        })
    }
}

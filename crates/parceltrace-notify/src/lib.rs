//! ParcelTrace — receipt notification boundary.
//!
//! The courier core does not render or deliver anything itself: it hands a
//! [`ReceiptData`] to a [`ReceiptNotifier`], and the delivery side (mail
//! transport, PDF renderer, barcode imaging) lives behind that trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use parceltrace_courier::domain::courier::{Courier, CourierStatus};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

/// Everything a notification backend needs to render and deliver a waybill
/// receipt for one courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptData {
    pub tracking_number: String,
    pub status: CourierStatus,
    pub current_location_country: Option<String>,
    pub current_location_city: Option<String>,
    pub estimated_delivery_date: Option<NaiveDate>,
    pub receiver_name: String,
    pub receiver_email: String,
    /// Content to encode as a Code128 barcode on the receipt.
    pub barcode_payload: String,
    /// Subject line for the delivery email.
    pub subject: String,
}

impl ReceiptData {
    /// Builds the receipt payload for a courier.
    #[must_use]
    pub fn for_courier(courier: &Courier) -> Self {
        Self {
            tracking_number: courier.tracking_number.clone(),
            status: courier.status,
            current_location_country: courier.current_location_country.clone(),
            current_location_city: courier.current_location_city.clone(),
            estimated_delivery_date: courier.estimated_delivery_date,
            receiver_name: courier.receiver.name.clone(),
            receiver_email: courier.receiver.email.clone(),
            barcode_payload: courier.tracking_number.clone(),
            subject: format!("Waybill Receipt - {}", courier.tracking_number),
        }
    }
}

/// Error surfaced when a receipt cannot be delivered. Delivery failures
/// never roll back the courier write that triggered them.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The transport failed for one recipient.
    #[error("failed to deliver receipt to {recipient}: {reason}")]
    Delivery {
        /// Recipient email address.
        recipient: String,
        /// Transport-reported reason.
        reason: String,
    },
}

/// Delivery-side contract for waybill receipts.
#[async_trait]
pub trait ReceiptNotifier: Send + Sync {
    /// Renders and delivers one receipt.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError::Delivery` when the transport fails.
    async fn send_receipt(&self, receipt: &ReceiptData) -> Result<(), NotificationError>;
}

/// Notifier used when no mail transport is configured: logs the receipt
/// and reports success.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingReceiptNotifier;

#[async_trait]
impl ReceiptNotifier for LoggingReceiptNotifier {
    async fn send_receipt(&self, receipt: &ReceiptData) -> Result<(), NotificationError> {
        info!(
            tracking_number = %receipt.tracking_number,
            recipient = %receipt.receiver_email,
            "receipt delivery skipped: no mail transport configured"
        );
        Ok(())
    }
}

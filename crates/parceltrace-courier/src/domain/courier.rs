//! The courier record and its constituent parts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Delivery status of a courier.
///
/// Serialized (and stored) as the human-readable strings shown on the
/// tracking page, e.g. `"Out for Delivery"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CourierStatus {
    /// The order has been placed but not yet picked up.
    #[serde(rename = "Order Placed")]
    OrderPlaced,
    /// The package is moving between facilities.
    #[serde(rename = "In Transit")]
    InTransit,
    /// The package is on a vehicle for final delivery.
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    /// The package has been delivered.
    Delivered,
    /// Awaiting processing. Default for new couriers.
    #[default]
    Pending,
    /// The package was returned to the sender.
    Returned,
    /// A delivery attempt failed.
    #[serde(rename = "Failed Delivery")]
    FailedDelivery,
}

impl CourierStatus {
    /// Returns the display/storage string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OrderPlaced => "Order Placed",
            Self::InTransit => "In Transit",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Pending => "Pending",
            Self::Returned => "Returned",
            Self::FailedDelivery => "Failed Delivery",
        }
    }
}

impl fmt::Display for CourierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status string.
#[derive(Debug, Error)]
#[error("unknown courier status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for CourierStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Order Placed" => Ok(Self::OrderPlaced),
            "In Transit" => Ok(Self::InTransit),
            "Out for Delivery" => Ok(Self::OutForDelivery),
            "Delivered" => Ok(Self::Delivered),
            "Pending" => Ok(Self::Pending),
            "Returned" => Ok(Self::Returned),
            "Failed Delivery" => Ok(Self::FailedDelivery),
            other => Err(UnknownStatus(other.to_owned())),
        }
    }
}

/// Domestic or international shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Category {
    /// Shipment within one country. Default.
    #[default]
    Domestic,
    /// Cross-border shipment.
    International,
}

impl Category {
    /// Returns the display/storage string for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Domestic => "Domestic",
            Self::International => "International",
        }
    }
}

/// Error returned when parsing an unknown category string.
#[derive(Debug, Error)]
#[error("unknown courier category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Domestic" => Ok(Self::Domestic),
            "International" => Ok(Self::International),
            other => Err(UnknownCategory(other.to_owned())),
        }
    }
}

/// Contact details for one side of a shipment (sender or receiver).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// Physical package details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub item_description: String,
    #[serde(default = "default_number_of_items")]
    pub number_of_items: u32,
    pub parcel_colour: String,
    /// Weight in kilograms, if known.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Shipping rate charged for this package.
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub destination_country: Option<String>,
    #[serde(default)]
    pub destination_city: Option<String>,
}

fn default_number_of_items() -> u32 {
    1
}

/// Shipping document references printed on the waybill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDocument {
    pub trailer_number: String,
    pub seal_number: String,
    /// Standard Carrier Alpha Code.
    #[serde(default)]
    pub scac: Option<String>,
}

impl Default for ShippingDocument {
    fn default() -> Self {
        Self {
            trailer_number: "332764".to_owned(),
            seal_number: "9977".to_owned(),
            scac: None,
        }
    }
}

/// One package in transit.
///
/// `tracking_number` is assigned exactly once, at first persistence, and is
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Courier {
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

impl Courier {
    /// Assembles a courier from creation fields, before first persistence.
    #[must_use]
    pub fn from_parts(id: Uuid, tracking_number: String, fields: NewCourier, now: DateTime<Utc>) -> Self {
        Self {
            id,
            tracking_number,
            status: fields.status,
            current_location_country: fields.current_location_country,
            current_location_city: fields.current_location_city,
            shipping: fields.shipping,
            receiver: fields.receiver,
            sender: fields.sender,
            package: fields.package,
            date_sent: fields.date_sent,
            estimated_delivery_date: fields.estimated_delivery_date,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fields supplied when creating a courier. Identity, tracking number and
/// timestamps are assigned by the write path.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourier {
    #[serde(default)]
    pub status: CourierStatus,
    #[serde(default)]
    pub current_location_country: Option<String>,
    #[serde(default)]
    pub current_location_city: Option<String>,
    #[serde(default)]
    pub shipping: ShippingDocument,
    pub receiver: Party,
    pub sender: Party,
    pub package: Package,
    pub date_sent: NaiveDate,
    #[serde(default)]
    pub estimated_delivery_date: Option<NaiveDate>,
}

/// Partial update of a courier. Absent fields are left unchanged; the
/// tracking number and timestamps cannot be touched from here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourierUpdate {
    #[serde(default)]
    pub status: Option<CourierStatus>,
    #[serde(default)]
    pub current_location_country: Option<String>,
    #[serde(default)]
    pub current_location_city: Option<String>,
    #[serde(default)]
    pub shipping: Option<ShippingDocument>,
    #[serde(default)]
    pub receiver: Option<Party>,
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default)]
    pub package: Option<Package>,
    #[serde(default)]
    pub date_sent: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_delivery_date: Option<NaiveDate>,
}

impl CourierUpdate {
    /// Applies the provided fields onto an existing courier.
    pub fn apply(&self, courier: &mut Courier) {
        if let Some(status) = self.status {
            courier.status = status;
        }
        if let Some(country) = &self.current_location_country {
            courier.current_location_country = Some(country.clone());
        }
        if let Some(city) = &self.current_location_city {
            courier.current_location_city = Some(city.clone());
        }
        if let Some(shipping) = &self.shipping {
            courier.shipping = shipping.clone();
        }
        if let Some(receiver) = &self.receiver {
            courier.receiver = receiver.clone();
        }
        if let Some(sender) = &self.sender {
            courier.sender = sender.clone();
        }
        if let Some(package) = &self.package {
            courier.package = package.clone();
        }
        if let Some(date_sent) = self.date_sent {
            courier.date_sent = date_sent;
        }
        if let Some(eta) = self.estimated_delivery_date {
            courier.estimated_delivery_date = Some(eta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_display_strings() {
        for status in [
            CourierStatus::OrderPlaced,
            CourierStatus::InTransit,
            CourierStatus::OutForDelivery,
            CourierStatus::Delivered,
            CourierStatus::Pending,
            CourierStatus::Returned,
            CourierStatus::FailedDelivery,
        ] {
            let parsed: CourierStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_status_serializes_as_display_string() {
        let value = serde_json::to_value(CourierStatus::OutForDelivery).unwrap();
        assert_eq!(value, serde_json::json!("Out for Delivery"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("Lost in Space".parse::<CourierStatus>().is_err());
    }

    #[test]
    fn test_default_status_is_pending() {
        assert_eq!(CourierStatus::default(), CourierStatus::Pending);
    }

    #[test]
    fn test_shipping_document_defaults() {
        let doc = ShippingDocument::default();
        assert_eq!(doc.trailer_number, "332764");
        assert_eq!(doc.seal_number, "9977");
        assert!(doc.scac.is_none());
    }

    #[test]
    fn test_update_leaves_absent_fields_untouched() {
        let mut courier = parceltrace_test_support::sample_courier("CTR-TEST01");
        let before = courier.clone();

        let update = CourierUpdate {
            status: Some(CourierStatus::InTransit),
            ..CourierUpdate::default()
        };
        update.apply(&mut courier);

        assert_eq!(courier.status, CourierStatus::InTransit);
        assert_eq!(courier.receiver, before.receiver);
        assert_eq!(courier.current_location_city, before.current_location_city);
        assert_eq!(courier.tracking_number, before.tracking_number);
    }
}

//! Courier fixtures shared across test suites.

use chrono::{NaiveDate, TimeZone, Utc};
use parceltrace_courier::domain::courier::{
    Category, Courier, CourierStatus, NewCourier, Package, Party, ShippingDocument,
};
use uuid::Uuid;

/// Valid creation fields for an international shipment from Lagos to Paris.
/// Status defaults to `Pending` and no estimated delivery date is set.
#[must_use]
pub fn sample_new_courier() -> NewCourier {
    NewCourier {
        status: CourierStatus::Pending,
        current_location_country: Some("Nigeria".to_owned()),
        current_location_city: Some("Lagos".to_owned()),
        shipping: ShippingDocument::default(),
        receiver: Party {
            name: "Amina Diallo".to_owned(),
            contact_number: "+33612345678".to_owned(),
            email: "amina.diallo@example.com".to_owned(),
            address: "8 Avenue Victor Hugo, Paris".to_owned(),
            country: Some("France".to_owned()),
            city: Some("Paris".to_owned()),
        },
        sender: Party {
            name: "Tunde Okafor".to_owned(),
            contact_number: "+2348012345678".to_owned(),
            email: "tunde.okafor@example.com".to_owned(),
            address: "12 Marina Road, Lagos".to_owned(),
            country: Some("Nigeria".to_owned()),
            city: Some("Lagos".to_owned()),
        },
        package: Package {
            item_description: "Books and documents".to_owned(),
            number_of_items: 2,
            parcel_colour: "Brown".to_owned(),
            weight: Some(3.5),
            rate: 45.0,
            category: Category::International,
            destination_country: Some("France".to_owned()),
            destination_city: Some("Paris".to_owned()),
        },
        date_sent: NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
        estimated_delivery_date: None,
    }
}

/// A persisted-looking courier with the given tracking number and a fresh
/// random id.
#[must_use]
pub fn sample_courier(tracking_number: &str) -> Courier {
    Courier::from_parts(
        Uuid::new_v4(),
        tracking_number.to_owned(),
        sample_new_courier(),
        Utc.with_ymd_and_hms(2026, 2, 28, 12, 0, 0).unwrap(),
    )
}

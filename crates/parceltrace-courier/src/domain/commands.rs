//! Commands for the courier context.

use uuid::Uuid;

use super::courier::{CourierUpdate, NewCourier};

/// Command to create a new courier. A tracking number is allocated as part
/// of handling.
#[derive(Debug, Clone)]
pub struct CreateCourier {
    /// Creation fields supplied by the caller.
    pub fields: NewCourier,
}

/// Command to update an existing courier.
#[derive(Debug, Clone)]
pub struct UpdateCourier {
    /// The courier to update.
    pub courier_id: Uuid,
    /// The fields to change.
    pub update: CourierUpdate,
}

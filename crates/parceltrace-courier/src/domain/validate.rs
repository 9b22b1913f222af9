//! Field validation for courier writes.

use parceltrace_core::error::DomainError;

use super::courier::{Courier, Party};

fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_party(side: &str, party: &Party) -> Result<(), DomainError> {
    require(&format!("{side}_name"), &party.name)?;
    require(&format!("{side}_contact_number"), &party.contact_number)?;
    require(&format!("{side}_email"), &party.email)?;
    require(&format!("{side}_address"), &party.address)?;
    if !party.email.contains('@') {
        return Err(DomainError::Validation(format!(
            "{side}_email is not a valid email address: {}",
            party.email
        )));
    }
    Ok(())
}

/// Validates a courier's fields before persistence.
///
/// # Errors
///
/// Returns `DomainError::Validation` naming the first offending field.
pub fn validate_courier(courier: &Courier) -> Result<(), DomainError> {
    validate_party("receiver", &courier.receiver)?;
    validate_party("sender", &courier.sender)?;
    require("item_description", &courier.package.item_description)?;
    require("parcel_colour", &courier.package.parcel_colour)?;
    if courier.package.number_of_items == 0 {
        return Err(DomainError::Validation(
            "number_of_items must be at least 1".to_owned(),
        ));
    }
    if courier.package.rate < 0.0 {
        return Err(DomainError::Validation("rate must not be negative".to_owned()));
    }
    if courier.package.weight.is_some_and(|w| w < 0.0) {
        return Err(DomainError::Validation(
            "weight must not be negative".to_owned(),
        ));
    }
    Ok(())
}

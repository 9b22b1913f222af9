//! ParcelTrace — HTTP API.
//!
//! Admin courier management under `/api/v1/couriers`, the public tracking
//! lookup under `/api/v1/tracking`, and a health check.

pub mod error;
pub mod routes;
pub mod state;

//! ParcelTrace — courier domain.
//!
//! Owns the two core mechanisms of the service: tracking-number allocation
//! (unique, human-readable identifiers with a bounded retry loop) and the
//! append-only tracking history recorded after every courier write.

pub mod allocator;
pub mod application;
pub mod audit;
pub mod domain;
pub mod repository;

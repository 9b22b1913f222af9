//! ParcelTrace Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the courier
//! domain and its infrastructure depend on. It contains no persistence or
//! HTTP code.

pub mod clock;
pub mod error;
pub mod rng;

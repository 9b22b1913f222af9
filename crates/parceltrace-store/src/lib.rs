//! PostgreSQL-backed persistence for the ParcelTrace service.

pub mod pg_courier_repository;
pub mod schema;

//! Shared test mocks and fixtures for the ParcelTrace service.

mod clock;
mod fixtures;
mod notifier;
mod repository;
mod rng;

pub use clock::{FixedClock, SteppingClock};
pub use fixtures::{sample_courier, sample_new_courier};
pub use notifier::{FailingReceiptNotifier, RecordingReceiptNotifier};
pub use repository::{FailingCourierRepository, InMemoryCourierRepository};
pub use rng::{ConstantTokenRng, SequenceTokenRng};

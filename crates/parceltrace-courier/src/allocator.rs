//! Tracking-number allocation.
//!
//! Tracking numbers look like `CTR-7KQ2M9`: a fixed prefix followed by six
//! characters drawn from uppercase letters and digits (36^6 possible
//! tokens). Allocation generates a candidate, checks the persisted set, and
//! retries on collision up to a bounded attempt count.

use parceltrace_core::error::DomainError;
use parceltrace_core::rng::TokenRng;

use crate::repository::CourierRepository;

/// Fixed prefix on every tracking number.
pub const TRACKING_PREFIX: &str = "CTR";

/// Number of random characters after the prefix.
pub const TOKEN_LENGTH: usize = 6;

/// Characters a token is drawn from.
pub const TOKEN_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Upper bound on candidate tokens tried before giving up.
pub const MAX_ALLOCATION_ATTEMPTS: u32 = 10;

/// Generates one candidate tracking number from the injected random source.
#[must_use]
pub fn generate_candidate(rng: &mut dyn TokenRng) -> String {
    let mut token = String::with_capacity(TRACKING_PREFIX.len() + 1 + TOKEN_LENGTH);
    token.push_str(TRACKING_PREFIX);
    token.push('-');
    for _ in 0..TOKEN_LENGTH {
        let index = rng.next_index(TOKEN_ALPHABET.len());
        token.push(char::from(TOKEN_ALPHABET[index]));
    }
    token
}

/// Allocates a tracking number not currently held by any persisted courier.
///
/// The existence check here is a best-effort pre-check; the store's
/// uniqueness constraint remains the authoritative guard, and the write
/// path retries on commit-time conflicts.
///
/// # Errors
///
/// Returns `DomainError::AllocationExhausted` when every candidate within
/// the attempt bound collided, or `DomainError::Infrastructure` if the
/// existence check fails.
pub async fn allocate(
    rng: &mut dyn TokenRng,
    repo: &dyn CourierRepository,
) -> Result<String, DomainError> {
    for _ in 0..MAX_ALLOCATION_ATTEMPTS {
        let candidate = generate_candidate(rng);
        if !repo.tracking_number_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(DomainError::AllocationExhausted {
        attempts: MAX_ALLOCATION_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use parceltrace_test_support::{
        ConstantTokenRng, InMemoryCourierRepository, SequenceTokenRng, sample_courier,
    };

    use super::*;

    #[test]
    fn test_generate_candidate_uses_prefix_and_alphabet() {
        let mut rng = SequenceTokenRng::new(vec![0, 1, 2, 25, 26, 35]);

        let candidate = generate_candidate(&mut rng);

        assert_eq!(candidate, "CTR-ABCZ09");
    }

    #[test]
    fn test_generate_candidate_has_expected_shape() {
        let mut rng = parceltrace_core::rng::SystemTokenRng;
        let candidate = generate_candidate(&mut rng);

        let (prefix, token) = candidate.split_once('-').unwrap();
        assert_eq!(prefix, "CTR");
        assert_eq!(token.len(), TOKEN_LENGTH);
        assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
    }

    #[tokio::test]
    async fn test_allocate_retries_past_an_occupied_token() {
        // Arrange: CTR-AAAAAA is taken; the rng yields it first, then CTR-BBBBBB.
        let repo = InMemoryCourierRepository::new();
        repo.insert_courier(&sample_courier("CTR-AAAAAA")).await.unwrap();
        let mut rng = SequenceTokenRng::new(vec![0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1]);

        // Act
        let allocated = allocate(&mut rng, &repo).await.unwrap();

        // Assert
        assert_eq!(allocated, "CTR-BBBBBB");
    }

    #[tokio::test]
    async fn test_allocate_exhausts_after_bounded_attempts() {
        // Arrange: the rng only ever yields CTR-AAAAAA, which is taken.
        let repo = InMemoryCourierRepository::new();
        repo.insert_courier(&sample_courier("CTR-AAAAAA")).await.unwrap();
        let mut rng = ConstantTokenRng(0);

        // Act
        let result = allocate(&mut rng, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::AllocationExhausted { attempts } => {
                assert_eq!(attempts, MAX_ALLOCATION_ATTEMPTS);
            }
            other => panic!("expected AllocationExhausted, got {other:?}"),
        }
    }
}

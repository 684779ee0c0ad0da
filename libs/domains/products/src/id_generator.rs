//! Six digit product identifiers.
//!
//! Identifiers are random rather than sequential. Collisions are possible;
//! the store rejects them through the primary key and the service retries.

use rand::RngCore;

const ID_MODULUS: i32 = 1_000_000;
const ID_FLOOR: i32 = 100_000;

/// Draw a 6-digit identifier (`100000..=999999`) from `rng`.
///
/// Each draw reinterprets 32 random bits as a signed integer, keeps the
/// absolute remainder modulo one million and rejects values below 100000.
pub fn generate_product_id<R: RngCore + ?Sized>(rng: &mut R) -> String {
    loop {
        let raw = rng.next_u32() as i32;
        let candidate = (raw % ID_MODULUS).abs();
        if candidate >= ID_FLOOR {
            return candidate.to_string();
        }
    }
}

/// `^[1-9][0-9]{5}$`
pub fn is_valid_product_id(id: &str) -> bool {
    id.len() == 6 && id.bytes().all(|b| b.is_ascii_digit()) && !id.starts_with('0')
}

/// Source of identifiers for new products
pub trait ProductIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Production generator backed by the thread-local CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl ProductIdGenerator for RandomIdGenerator {
    fn next_id(&self) -> String {
        generate_product_id(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Replays fixed 32-bit draws
    struct Draws(std::vec::IntoIter<u32>);

    impl RngCore for Draws {
        fn next_u32(&mut self) -> u32 {
            self.0.next().expect("ran out of draws")
        }

        fn next_u64(&mut self) -> u64 {
            u64::from(self.next_u32())
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            for chunk in dst.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    fn draws(values: &[u32]) -> Draws {
        Draws(values.to_vec().into_iter())
    }

    #[test]
    fn test_rejects_short_values_and_retries() {
        // 5 and 99_999 fall below the floor, 1_234_567 reduces to 234567
        let mut rng = draws(&[5, 99_999, 1_234_567]);
        assert_eq!(generate_product_id(&mut rng), "234567");
    }

    #[test]
    fn test_negative_draws_use_absolute_remainder() {
        let mut rng = draws(&[(-123_456_789i32) as u32]);
        assert_eq!(generate_product_id(&mut rng), "456789");
    }

    #[test]
    fn test_generated_ids_are_six_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let id = generate_product_id(&mut rng);
            assert!(is_valid_product_id(&id), "unexpected id {}", id);
        }
    }

    #[test]
    fn test_random_generator() {
        let id = RandomIdGenerator.next_id();
        assert!(is_valid_product_id(&id));
    }

    #[test]
    fn test_is_valid_product_id() {
        assert!(is_valid_product_id("100000"));
        assert!(is_valid_product_id("999999"));
        assert!(!is_valid_product_id("099999"));
        assert!(!is_valid_product_id("12345"));
        assert!(!is_valid_product_id("12345a"));
        assert!(!is_valid_product_id("1234567"));
    }
}

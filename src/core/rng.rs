//! Deterministic random number generation for board setup.
//!
//! Both engines initialize their boards from a shuffled sequence: the
//! puzzle shuffles home positions across slots, the memotest shuffles
//! pair ids across the board. All of that randomness flows through
//! `GameRng` so a seed fully determines the layout.
//!
//! ## Usage
//!
//! ```
//! use tile_games::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//!
//! let order_a = a.shuffled((0..16u16).collect());
//! let order_b = b.shuffled((0..16u16).collect());
//! assert_eq!(order_a, order_b);
//! ```

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG backing board generation.
///
/// Uses ChaCha8 for speed while keeping high-quality randomness, so every
/// one of the `n!` orderings of a shuffled sequence is equiprobable.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the operating system.
    ///
    /// Use for interactive sessions; tests should prefer `new` with a
    /// fixed seed.
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed = rand::thread_rng().gen();
        Self::new(seed)
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random u64 (used to derive per-engine seeds).
    pub fn gen_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (uniform Fisher–Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Return a uniformly shuffled permutation of the input sequence.
    ///
    /// Sequences of length 0 or 1 come back unchanged.
    #[must_use]
    pub fn shuffled<T>(&mut self, mut items: Vec<T>) -> Vec<T> {
        self.shuffle(&mut items);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        for _ in 0..100 {
            assert_eq!(
                rng1.gen_range_usize(0..1000),
                rng2.gen_range_usize(0..1000)
            );
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = GameRng::new(1);
        let mut rng2 = GameRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range_usize(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range_usize(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = GameRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_shuffled_trivial_inputs_unchanged() {
        let mut rng = GameRng::new(42);

        let empty: Vec<u8> = rng.shuffled(Vec::new());
        assert!(empty.is_empty());

        let single = rng.shuffled(vec![9]);
        assert_eq!(single, vec![9]);
    }

    #[test]
    fn test_shuffled_deterministic_per_seed() {
        let mut rng1 = GameRng::new(7);
        let mut rng2 = GameRng::new(7);

        let a = rng1.shuffled((0..64u16).collect::<Vec<_>>());
        let b = rng2.shuffled((0..64u16).collect::<Vec<_>>());

        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_accessor() {
        let rng = GameRng::new(99);
        assert_eq!(rng.seed(), 99);
    }
}

//! Random number generation for shuffles, draws, and rest selection.
//!
//! ## Key Features
//!
//! - **Secure**: `GameRng::secure()` seeds ChaCha20 from OS entropy
//! - **Deterministic on demand**: `GameRng::new(seed)` for tests and replays
//! - **Pluggable**: engine code depends on the `RandomSource` trait, so a
//!   host can substitute its own secure integer source
//!
//! ```
//! use hexhaven_engine::core::{GameRng, RandomSource};
//!
//! let mut rng = GameRng::new(42);
//! let roll = rng.random_int(0, 20);
//! assert!((0..20).contains(&roll));
//!
//! let mut again = GameRng::new(42);
//! assert_eq!(again.random_int(0, 20), roll);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Uniform random-integer source consumed by the engine.
pub trait RandomSource {
    /// Uniform integer in `min..max_exclusive`.
    ///
    /// Returns `min` when the range is empty.
    fn random_int(&mut self, min: i64, max_exclusive: i64) -> i64;

    /// Uniform index into a collection of `len` elements.
    fn random_index(&mut self, len: usize) -> usize {
        self.random_int(0, len as i64) as usize
    }

    /// Fisher–Yates shuffle in place over `random_index`.
    ///
    /// `GameRng` overrides this with `rand`'s slice shuffle.
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.random_index(i + 1);
            items.swap(i, j);
        }
    }
}

/// ChaCha20-backed random source.
///
/// One instance is owned per room; rooms never share a generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha20Rng,
}

impl GameRng {
    /// Create a deterministic RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    #[must_use]
    pub fn secure() -> Self {
        Self {
            inner: ChaCha20Rng::from_entropy(),
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::secure()
    }
}

impl RandomSource for GameRng {
    fn random_int(&mut self, min: i64, max_exclusive: i64) -> i64 {
        if max_exclusive <= min {
            return min;
        }
        self.inner.gen_range(min..max_exclusive)
    }

    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        use rand::seq::SliceRandom;
        items.shuffle(&mut self.inner);
    }
}

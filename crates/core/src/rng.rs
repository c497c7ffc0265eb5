//! RNG module - injectable randomness for block and target generation
//!
//! Every transition that needs randomness takes a [`RandomSource`] instead of
//! reaching for a global generator, so a game can be replayed exactly from its
//! seed.
//!
//! Also provides a simple LCG for deterministic play and testing.

/// Source of random numbers used by the game rules.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits of the generator (multiply-shift), which are far
    /// better distributed than the low bits of an LCG.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Generate random value in range [lo, hi]
    fn range_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_range(hi - lo + 1)
    }

    /// Shuffle the first `count` positions of a slice (partial Fisher-Yates).
    ///
    /// After the call, `slice[..count]` is a uniform sample without replacement.
    fn shuffle_prefix<T>(&mut self, slice: &mut [T], count: usize)
    where
        Self: Sized,
    {
        let n = slice.len();
        for i in 0..count.min(n) {
            let j = i + self.next_range((n - i) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current internal state (feeding it back into `new` resumes the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        let v1 = rng1.next_u32();
        let v2 = rng2.next_u32();
        assert_ne!(v1, v2);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        let mut zero = SimpleRng::new(0);
        let mut one = SimpleRng::new(1);
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_range_inclusive_stays_in_bounds_and_hits_both_ends() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 10];
        for _ in 0..2000 {
            let v = rng.range_inclusive(1, 9);
            assert!((1..=9).contains(&v));
            seen[v as usize] = true;
        }
        assert!(seen[1..=9].iter().all(|&s| s), "every value should appear");
    }

    #[test]
    fn test_next_range_zero_is_zero() {
        let mut rng = SimpleRng::new(3);
        assert_eq!(rng.next_range(0), 0);
        assert_eq!(rng.range_inclusive(4, 4), 4);
    }

    #[test]
    fn test_shuffle_prefix_is_a_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut items = [0, 1, 2, 3, 4, 5, 6, 7];
        rng.shuffle_prefix(&mut items, 3);

        let mut sorted = items;
        sorted.sort_unstable();
        assert_eq!(sorted, [0, 1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn draw(mut rng: impl RandomSource) -> u32 {
            rng.next_u32()
        }

        let mut a = SimpleRng::new(5);
        let mut b = SimpleRng::new(5);
        assert_eq!(a.next_u32(), draw(&mut b));
        // The borrowed generator advanced too.
        assert_eq!(a.next_u32(), b.next_u32());
    }
}

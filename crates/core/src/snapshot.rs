//! Snapshot fingerprints.
//!
//! Frontends redraw only when what they would draw changed. A fingerprint is a
//! stable 64-bit FNV-1a hash of any `Hash` value (typically a `GameState`, or a
//! state paired with frontend-only data such as a cursor).
//!
//! We avoid `DefaultHasher` here since its output is not guaranteed stable across
//! Rust versions/platforms.

use std::hash::{Hash, Hasher};

/// Stable 64-bit FNV-1a hasher
#[derive(Debug, Clone)]
pub struct Fnv1aHasher {
    state: u64,
}

impl Fnv1aHasher {
    const OFFSET_BASIS: u64 = 0xcbf29ce484222325;
    const PRIME: u64 = 0x100000001b3;

    pub fn new() -> Self {
        Self {
            state: Self::OFFSET_BASIS,
        }
    }
}

impl Default for Fnv1aHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.state
    }

    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state ^= b as u64;
            self.state = self.state.wrapping_mul(Self::PRIME);
        }
    }
}

/// Fingerprint a value
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut h = Fnv1aHasher::new();
    value.hash(&mut h);
    h.finish()
}

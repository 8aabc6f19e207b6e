//! Deterministic RNG for match resolution
//!
//! The RNG state lives inside `MatchState` and is serialized with it, so a
//! match replayed from a snapshot makes the same AI and shuffle decisions.

use serde::{Deserialize, Serialize};

/// Random decisions the engine needs: AI picks, lane weights, shuffles
pub trait BattleRng {
    fn next_u32(&mut self) -> u32;

    /// A random index in [0, max); 0 when max is 0
    fn gen_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u32() as usize) % max
    }

    /// A random f64 in [0, 1), for weighted rolls
    fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Fisher-Yates shuffle, used for deck order
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.gen_range(i + 1);
            slice.swap(i, j);
        }
    }
}

/// Xorshift32 generator
///
/// Fast, tiny, and good enough for game decisions. The all-zero state is a
/// fixed point of xorshift, so seeding coerces it to 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShiftRng {
    state: u32,
}

impl XorShiftRng {
    /// Seed from a u64 (typically a timestamp), folding the halves together
    pub fn seed_from_u64(seed: u64) -> Self {
        let state = ((seed as u32) ^ ((seed >> 32) as u32)).max(1);
        Self { state }
    }

    pub fn seed_from_u32(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }
}

impl BattleRng for XorShiftRng {
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

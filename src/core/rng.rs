//! RNG module - deterministic tile value generation
//!
//! A small seeded LCG keeps the engine reproducible: two sources built from
//! the same seed produce identical draw sequences, which pins initial grids
//! and refill values for replays and tests.

use crate::types::MAX_INIT_VALUE;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Draw a fresh tile value in `1..=max`.
    pub fn tile_value(&mut self, max: u8) -> u8 {
        (self.next_range(max as u32) + 1) as u8
    }

    /// Draw a fresh tile value in the default init range.
    pub fn init_value(&mut self) -> u8 {
        self.tile_value(MAX_INIT_VALUE)
    }

    /// Current internal state (for restarting with the same future draws).
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

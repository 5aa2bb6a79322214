//! RNG module - bag randomizer
//!
//! The bag holds one copy of each of the 7 piece kinds. Each draw removes a
//! uniformly random entry; an empty bag is refilled with a fresh set of 7 before
//! drawing. Every run of 7 draws starting at a refill boundary is therefore a
//! permutation of all kinds.
//!
//! Also provides a simple LCG so rounds are reproducible from a seed.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::PieceKind;

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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// 7-bag piece generator (draw without replacement)
#[derive(Debug, Clone)]
pub struct Bag {
    remaining: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl Bag {
    pub fn new(seed: u32) -> Self {
        Self {
            remaining: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.remaining.clear();
        self.remaining.extend(PieceKind::ALL);
    }

    /// Remove a random kind from the bag, refilling first when it is empty
    pub fn draw_kind(&mut self) -> PieceKind {
        if self.remaining.is_empty() {
            self.refill();
        }
        let idx = self.rng.next_range(self.remaining.len() as u32) as usize;
        self.remaining.remove(idx)
    }

    /// Draw the next piece in its canonical orientation
    pub fn draw(&mut self) -> Piece {
        Piece::main(self.draw_kind())
    }

    /// Kinds still in the current bag (unordered)
    pub fn remaining(&self) -> &[PieceKind] {
        &self.remaining
    }
}

impl Default for Bag {
    fn default() -> Self {
        Self::new(1)
    }
}

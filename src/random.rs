//! Random sources for placement and bots.
//!
//! Everything random in the engine goes through [`Randomness`], so a game can
//! run on a seeded generator, on entropy, or on a scripted sequence that
//! replays a known line of play.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::common::Coord;

/// Source of the three random choices the engine makes.
pub trait Randomness {
    /// Uniform index in `0..bound`. `bound` must be non-zero.
    fn index(&mut self, bound: usize) -> usize;

    /// Fair coin.
    fn flip(&mut self) -> bool;

    /// Shuffle candidate cells in place.
    fn shuffle(&mut self, cells: &mut [Coord]);
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngRandomness<R: Rng> {
    rng: R,
}

pub type DefaultRandomness = RngRandomness<SmallRng>;

impl<R: Rng> RngRandomness<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RngRandomness<SmallRng> {
    /// Reproducible generator: the same seed plays the same game.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    #[cfg(feature = "std")]
    pub fn from_entropy() -> Self {
        let mut seed_rng = rand::rng();
        Self::new(SmallRng::from_rng(&mut seed_rng))
    }
}

impl<R: Rng> Randomness for RngRandomness<R> {
    fn index(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }

    fn flip(&mut self) -> bool {
        self.rng.random()
    }

    fn shuffle(&mut self, cells: &mut [Coord]) {
        cells.shuffle(&mut self.rng);
    }
}

/// Replays queued choices, then continues from a seeded fallback generator.
///
/// Queued indices are reduced modulo the requested bound. A queued shuffle
/// order is a permutation of positions: `[1, 0]` swaps a pair. Orders whose
/// length does not match the slice are discarded and the fallback shuffles
/// instead.
#[derive(Debug, Clone)]
pub struct ScriptedRandomness {
    indices: VecDeque<usize>,
    flips: VecDeque<bool>,
    orders: VecDeque<Vec<usize>>,
    fallback: DefaultRandomness,
}

impl ScriptedRandomness {
    pub fn new() -> Self {
        Self {
            indices: VecDeque::new(),
            flips: VecDeque::new(),
            orders: VecDeque::new(),
            fallback: DefaultRandomness::seeded(0),
        }
    }

    pub fn with_indices<I: IntoIterator<Item = usize>>(mut self, indices: I) -> Self {
        self.indices.extend(indices);
        self
    }

    pub fn with_flips<I: IntoIterator<Item = bool>>(mut self, flips: I) -> Self {
        self.flips.extend(flips);
        self
    }

    pub fn with_order(mut self, order: Vec<usize>) -> Self {
        self.orders.push_back(order);
        self
    }

    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback = DefaultRandomness::seeded(seed);
        self
    }

    /// Queued choices not yet consumed.
    pub fn remaining(&self) -> usize {
        self.indices.len() + self.flips.len() + self.orders.len()
    }
}

impl Default for ScriptedRandomness {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomness for ScriptedRandomness {
    fn index(&mut self, bound: usize) -> usize {
        match self.indices.pop_front() {
            Some(i) => i % bound,
            None => self.fallback.index(bound),
        }
    }

    fn flip(&mut self) -> bool {
        match self.flips.pop_front() {
            Some(f) => f,
            None => self.fallback.flip(),
        }
    }

    fn shuffle(&mut self, cells: &mut [Coord]) {
        match self.orders.pop_front() {
            Some(order) if is_permutation(&order, cells.len()) => {
                let original: Vec<Coord> = cells.to_vec();
                for (slot, &from) in cells.iter_mut().zip(order.iter()) {
                    *slot = original[from];
                }
            }
            _ => self.fallback.shuffle(cells),
        }
    }
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = alloc::vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_replays_then_falls_back() {
        let mut rng = ScriptedRandomness::new().with_indices([12, 3]).with_flips([true]);
        assert_eq!(rng.index(10), 2);
        assert_eq!(rng.index(10), 3);
        assert!(rng.flip());
        assert_eq!(rng.remaining(), 0);
        assert!(rng.index(10) < 10);
    }

    #[test]
    fn scripted_order_applies_permutation() {
        let mut rng = ScriptedRandomness::new().with_order(alloc::vec![2, 0, 1]);
        let mut cells = [(0, 0), (1, 1), (2, 2)];
        rng.shuffle(&mut cells);
        assert_eq!(cells, [(2, 2), (0, 0), (1, 1)]);
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = DefaultRandomness::seeded(7);
        let mut b = DefaultRandomness::seeded(7);
        for _ in 0..32 {
            assert_eq!(a.index(100), b.index(100));
        }
    }
}

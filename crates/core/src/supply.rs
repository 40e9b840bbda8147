//! Supply module - 7-bag piece generation
//!
//! The bag holds one of each kind in shuffled order and is consumed from the
//! back. When it runs dry it is refilled with a fresh permutation, so every run
//! of seven draws that starts on a bag boundary contains each kind exactly once
//! and no kind waits more than 12 draws for its next appearance.
//!
//! Shuffling is Fisher-Yates via `rand`'s `SliceRandom`, which draws
//! unbiased indices; a fixed seed makes the whole sequence reproducible.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::PieceKind;

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct BagSupply {
    /// Remaining kinds of the current bag; `draw` pops from the end.
    bag: ArrayVec<PieceKind, 7>,
    rng: StdRng,
    /// Number of refills so far (starts at 0 before the first draw).
    bags_dealt: u64,
}

impl BagSupply {
    /// Deterministic supply for the given seed.
    pub fn new(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Supply seeded from the OS entropy source.
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng,
            bags_dealt: 0,
        }
    }

    fn shuffled_bag(rng: &mut StdRng) -> ArrayVec<PieceKind, 7> {
        let mut bag = ArrayVec::from(PieceKind::ALL);
        bag.shuffle(rng);
        bag
    }

    /// Draw the next piece, refilling the bag first if it is empty.
    pub fn draw(&mut self) -> PieceKind {
        if let Some(kind) = self.bag.pop() {
            return kind;
        }

        let mut bag = Self::shuffled_bag(&mut self.rng);
        let last = bag.len() - 1;
        let kind = bag[last];
        bag.truncate(last);
        self.bag = bag;
        self.bags_dealt += 1;
        kind
    }

    /// The kind the next [`BagSupply::draw`] will return, without consuming it.
    ///
    /// When the bag is empty this previews the next bag using a clone of the
    /// RNG, so the preview always matches the following draw.
    pub fn peek(&self) -> PieceKind {
        if let Some(&kind) = self.bag.last() {
            return kind;
        }

        let mut preview_rng = self.rng.clone();
        let next_bag = Self::shuffled_bag(&mut preview_rng);
        next_bag[next_bag.len() - 1]
    }

    /// Drop whatever is left of the current bag so the next draw reshuffles.
    ///
    /// Used when a new round starts; the RNG keeps its state, so a seeded
    /// supply stays reproducible across rounds.
    pub fn reset(&mut self) {
        self.bag.clear();
    }

    /// Kinds still waiting in the current bag, next draw last.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }

    /// How many bags have been shuffled so far.
    pub fn bags_dealt(&self) -> u64 {
        self.bags_dealt
    }
}

impl Default for BagSupply {
    fn default() -> Self {
        Self::from_entropy()
    }
}

//! RNG module - seedable piece generation
//!
//! The engine never touches a global random source. It owns a [`Randomizer`]
//! built from a seed, so a given seed always yields the same piece sequence.
//!
//! - [`RandomizerKind::Uniform`]: each kind drawn independently (default)
//! - [`RandomizerKind::SevenBag`]: shuffled bags of all seven kinds
//! - [`Randomizer::scripted`]: a fixed cycle of kinds, for tests and demos

use crate::shapes::random_kind;
use crate::types::PieceKind;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Which randomizer an engine builds from its seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RandomizerKind {
    #[default]
    Uniform,
    SevenBag,
}

/// Shuffled bag of all seven kinds, refilled when empty.
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl SevenBag {
    pub fn new(seed: u32) -> Self {
        let mut bag = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        bag.refill();
        bag
    }

    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        kind
    }
}

/// Source of piece kinds owned by the engine.
#[derive(Debug, Clone)]
pub enum Randomizer {
    Uniform(SimpleRng),
    SevenBag(SevenBag),
    /// Cycles through a fixed list.
    Scripted { kinds: Vec<PieceKind>, cursor: usize },
}

impl Randomizer {
    pub fn new(kind: RandomizerKind, seed: u32) -> Self {
        match kind {
            RandomizerKind::Uniform => Randomizer::Uniform(SimpleRng::new(seed)),
            RandomizerKind::SevenBag => Randomizer::SevenBag(SevenBag::new(seed)),
        }
    }

    /// A randomizer that repeats `kinds` forever.
    ///
    /// An empty list falls back to a uniform source seeded with 1.
    pub fn scripted(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        if kinds.is_empty() {
            return Randomizer::Uniform(SimpleRng::new(1));
        }
        Randomizer::Scripted { kinds, cursor: 0 }
    }

    pub fn next_kind(&mut self) -> PieceKind {
        match self {
            Randomizer::Uniform(rng) => random_kind(rng),
            Randomizer::SevenBag(bag) => bag.draw(),
            Randomizer::Scripted { kinds, cursor } => {
                let kind = kinds[*cursor % kinds.len()];
                *cursor = (*cursor + 1) % kinds.len();
                kind
            }
        }
    }
}

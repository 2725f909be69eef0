//! RNG module - 7-bag random piece generation
//!
//! Implements the "7-bag" randomization algorithm: each bag contains one of
//! each piece (I, J, L, O, S, T, Z), shuffled. Draws come from the bag until
//! it is empty, then a new bag is shuffled. Any 7 draws starting at a refill
//! boundary contain every kind exactly once.
//!
//! The bag belongs to a single engine instance. Shuffling goes through the
//! [`Shuffler`] trait so tests can inject a deterministic order; the engine
//! itself only sees a [`PieceSource`].

use crate::types::PieceKind;

/// Anything that can permute a bag of piece kinds.
pub trait Shuffler {
    fn shuffle(&mut self, kinds: &mut [PieceKind]);
}

/// Anything that hands out piece kinds one at a time.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
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

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod 2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current internal state.
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Shuffler for SimpleRng {
    /// Fisher-Yates shuffle
    fn shuffle(&mut self, kinds: &mut [PieceKind]) {
        for i in (1..kinds.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            kinds.swap(i, j);
        }
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct PieceBag<R: Shuffler = SimpleRng> {
    /// Current bag of pieces
    bag: [PieceKind; 7],
    /// Index of the next piece to hand out; 7 means the bag is empty
    bag_index: usize,
    shuffler: R,
}

impl PieceBag<SimpleRng> {
    /// Create a bag driven by the built-in LCG
    pub fn new(seed: u32) -> Self {
        Self::with_shuffler(SimpleRng::new(seed))
    }
}

impl<R: Shuffler> PieceBag<R> {
    /// Create an empty bag; the first draw shuffles a fresh one.
    pub fn with_shuffler(shuffler: R) -> Self {
        Self {
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
            shuffler,
        }
    }

    /// Generate a new shuffled bag
    fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.shuffler.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece from the bag
    pub fn draw(&mut self) -> PieceKind {
        if self.bag_index >= self.bag.len() {
            self.refill();
        }
        let piece = self.bag[self.bag_index];
        self.bag_index += 1;
        piece
    }

    /// Pieces left in the current bag before the next refill.
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag[self.bag_index..]
    }
}

impl<R: Shuffler> PieceSource for PieceBag<R> {
    fn next_kind(&mut self) -> PieceKind {
        self.draw()
    }
}

impl Default for PieceBag<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Leaves every bag in catalog order.
    struct InOrder;

    impl Shuffler for InOrder {
        fn shuffle(&mut self, _kinds: &mut [PieceKind]) {}
    }

    /// Reverses every bag.
    struct Reversed;

    impl Shuffler for Reversed {
        fn shuffle(&mut self, kinds: &mut [PieceKind]) {
            kinds.reverse();
        }
    }

    fn sorted(mut kinds: Vec<PieceKind>) -> Vec<PieceKind> {
        kinds.sort();
        kinds
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);
        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_normalized() {
        assert_eq!(SimpleRng::new(0).state(), 1);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(99);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_new_bag_starts_empty() {
        let bag = PieceBag::new(1);
        assert!(bag.remaining().is_empty());
    }

    #[test]
    fn test_every_bag_is_a_permutation() {
        for seed in 0..50u32 {
            let mut bag = PieceBag::new(seed);
            for _ in 0..10 {
                let drawn: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
                assert_eq!(sorted(drawn), PieceKind::ALL.to_vec(), "seed {}", seed);
                assert!(bag.remaining().is_empty());
            }
        }
    }

    #[test]
    fn test_injected_shuffler_controls_order() {
        let mut bag = PieceBag::with_shuffler(InOrder);
        let first: Vec<PieceKind> = (0..7).map(|_| bag.draw()).collect();
        assert_eq!(first, PieceKind::ALL.to_vec());

        let mut bag = PieceBag::with_shuffler(Reversed);
        assert_eq!(bag.draw(), PieceKind::Z);
        assert_eq!(bag.remaining().len(), 6);
    }

    #[test]
    fn test_repeat_gap_is_bounded() {
        // First of one bag and last of the next are 13 draws apart; nothing is ever further.
        let mut bag = PieceBag::new(2024);
        let draws: Vec<PieceKind> = (0..700).map(|_| bag.draw()).collect();
        for kind in PieceKind::ALL {
            let positions: Vec<usize> = draws
                .iter()
                .enumerate()
                .filter(|(_, &k)| k == kind)
                .map(|(i, _)| i)
                .collect();
            assert_eq!(positions.len(), 100);
            assert!(positions.windows(2).all(|w| w[1] - w[0] <= 13));
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceBag::new(7);
        let mut b = PieceBag::new(7);
        for _ in 0..28 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }
}

//! Fixed-width bit vector covering every (position, letter) pair.
//!
//! Bit `position * ALPHABET_SIZE + letter` stands for "letter at position".
//! A word is encoded as the set of its own (position, letter) bits, so checking
//! it against a set of allowed pairs is a single superset test.

use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Sub, SubAssign};

use crate::{ALPHABET_SIZE, WORD_LENGTH};

/// Number of meaningful bits.
pub const BITS: usize = WORD_LENGTH * ALPHABET_SIZE;

const BLOCKS: usize = BITS.div_ceil(64);

/// Index of the bit for `letter` (0-based, `a` = 0) at `position`.
#[inline]
pub fn bit_index(position: usize, letter: usize) -> usize {
    debug_assert!(position < WORD_LENGTH && letter < ALPHABET_SIZE);
    position * ALPHABET_SIZE + letter
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BitVector([u64; BLOCKS]);

impl BitVector {
    pub const fn empty() -> Self {
        Self([0; BLOCKS])
    }

    /// Every meaningful bit set; the padding above `BITS` stays clear.
    pub fn full() -> Self {
        let mut blocks = [u64::MAX; BLOCKS];
        let tail = BITS % 64;
        if tail != 0 {
            blocks[BLOCKS - 1] = (1u64 << tail) - 1;
        }
        Self(blocks)
    }

    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.0[index / 64] & (1 << (index % 64)) != 0
    }

    #[inline]
    pub fn set(&mut self, index: usize) {
        self.0[index / 64] |= 1 << (index % 64);
    }

    #[inline]
    pub fn clear(&mut self, index: usize) {
        self.0[index / 64] &= !(1 << (index % 64));
    }

    pub fn count_ones(&self) -> u32 {
        self.0.iter().map(|block| block.count_ones()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&block| block == 0)
    }

    /// `self ⊇ other`, i.e. `(self & other) == other`.
    #[inline]
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(&mine, &theirs)| mine & theirs == theirs)
    }

    /// Mask of all letters at one position.
    pub fn position_mask(position: usize) -> Self {
        let mut mask = Self::empty();
        for letter in 0..ALPHABET_SIZE {
            mask.set(bit_index(position, letter));
        }
        mask
    }

    /// Mask of one letter at every position.
    pub fn letter_mask(letter: usize) -> Self {
        let mut mask = Self::empty();
        for position in 0..WORD_LENGTH {
            mask.set(bit_index(position, letter));
        }
        mask
    }
}

impl BitAnd for BitVector {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self {
        self &= rhs;
        self
    }
}

impl BitAndAssign for BitVector {
    fn bitand_assign(&mut self, rhs: Self) {
        for (mine, theirs) in self.0.iter_mut().zip(rhs.0) {
            *mine &= theirs;
        }
    }
}

impl BitOr for BitVector {
    type Output = Self;

    fn bitor(mut self, rhs: Self) -> Self {
        self |= rhs;
        self
    }
}

impl BitOrAssign for BitVector {
    fn bitor_assign(&mut self, rhs: Self) {
        for (mine, theirs) in self.0.iter_mut().zip(rhs.0) {
            *mine |= theirs;
        }
    }
}

impl Not for BitVector {
    type Output = Self;

    fn not(self) -> Self {
        let mut inverted = Self::full();
        for (out, block) in inverted.0.iter_mut().zip(self.0) {
            *out &= !block;
        }
        inverted
    }
}

impl Sub for BitVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self & !rhs
    }
}

impl SubAssign for BitVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

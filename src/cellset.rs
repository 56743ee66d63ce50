//! A fixed-size set of grid cells packed into a single `u128`.
//!
//! The 10×10 grid needs 100 bits, so one integer holds a whole layer of board
//! state (occupancy, hits, misses, a ship's footprint). Set operations are
//! plain bitwise operations; out-of-bounds coordinates are never members.

use core::fmt;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::config::BOARD_SIZE;
use crate::coord::Coordinate;

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;
const MASK: u128 = (1u128 << CELLS) - 1;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellSet {
    bits: u128,
}

impl CellSet {
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Every cell of the grid.
    pub const fn full() -> Self {
        Self { bits: MASK }
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        coord.in_bounds() && (self.bits >> coord.index()) & 1 == 1
    }

    /// Adds `coord`; returns `true` if it was not already present.
    /// Out-of-bounds coordinates are ignored.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        if !coord.in_bounds() || self.contains(coord) {
            return false;
        }
        self.bits |= 1u128 << coord.index();
        true
    }

    pub fn remove(&mut self, coord: Coordinate) {
        if coord.in_bounds() {
            self.bits &= !(1u128 << coord.index());
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn is_disjoint(&self, other: &CellSet) -> bool {
        self.bits & other.bits == 0
    }

    /// Members in row-major order.
    pub fn iter(&self) -> Cells {
        Cells {
            bits: self.bits,
            idx: 0,
        }
    }
}

impl FromIterator<Coordinate> for CellSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        let mut set = CellSet::new();
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

impl<'a> IntoIterator for &'a CellSet {
    type Item = Coordinate;
    type IntoIter = Cells;

    fn into_iter(self) -> Cells {
        self.iter()
    }
}

/// Iterator over the members of a [`CellSet`].
#[derive(Clone, Copy)]
pub struct Cells {
    bits: u128,
    idx: usize,
}

impl Iterator for Cells {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Coordinate> {
        while self.idx < CELLS {
            let idx = self.idx;
            self.idx += 1;
            if (self.bits >> idx) & 1 == 1 {
                return Some(Coordinate::from_index(idx));
            }
        }
        None
    }
}

impl BitAnd for CellSet {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
        }
    }
}

impl BitOr for CellSet {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
        }
    }
}

/// Complement within the grid.
impl Not for CellSet {
    type Output = Self;
    fn not(self) -> Self {
        Self {
            bits: !self.bits & MASK,
        }
    }
}

impl BitAndAssign for CellSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl BitOrAssign for CellSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl fmt::Debug for CellSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CellSet ({} cells):", self.len())?;
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                let mark = if self.contains(Coordinate::new(r, c)) {
                    '■'
                } else {
                    '□'
                };
                write!(f, "{} ", mark)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

//! Board coordinates, strike lines and the two sides of a match.

use core::fmt;

use crate::common::GameError;
use crate::config::BOARD_SIZE;

/// A cell on the 10×10 grid, addressed as (row, col).
///
/// A `Coordinate` may be constructed out of bounds (ship cells computed past
/// the edge are reported that way); every board operation checks
/// [`Coordinate::in_bounds`] before touching state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Bounds-checked constructor for coordinates coming from a caller.
    pub fn try_new(row: usize, col: usize) -> Result<Self, GameError> {
        let coord = Self::new(row, col);
        if coord.in_bounds() {
            Ok(coord)
        } else {
            Err(GameError::InvalidCoordinate { row, col })
        }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major index in `0..BOARD_SIZE * BOARD_SIZE`.
    pub fn index(&self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub fn from_index(idx: usize) -> Self {
        Self::new(idx / BOARD_SIZE, idx % BOARD_SIZE)
    }

    /// Neighbour shifted by (`dr`, `dc`), or `None` if it falls off the grid.
    pub fn offset(&self, dr: isize, dc: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let coord = Self::new(row, col);
        coord.in_bounds().then_some(coord)
    }

    /// In-bounds orthogonal neighbours: up, down, left, right.
    pub fn neighbors(&self) -> impl Iterator<Item = Coordinate> + '_ {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Every cell of the grid in row-major order.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..BOARD_SIZE * BOARD_SIZE).map(Self::from_index)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Which participant of the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "service", serde(rename_all = "lowercase"))]
pub enum Side {
    /// The human.
    Player,
    /// The computer.
    Opponent,
}

/// Direction of an air strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "service", serde(rename_all = "lowercase"))]
pub enum LineKind {
    Row,
    Column,
}

/// A full row or column of the grid. Only constructed through [`Line::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "service", derive(serde::Serialize))]
pub struct Line {
    kind: LineKind,
    index: usize,
}

impl Line {
    pub fn new(kind: LineKind, index: usize) -> Result<Self, GameError> {
        if index >= BOARD_SIZE {
            return Err(GameError::InvalidTarget { kind, index });
        }
        Ok(Self { kind, index })
    }

    pub fn row(index: usize) -> Result<Self, GameError> {
        Self::new(LineKind::Row, index)
    }

    pub fn column(index: usize) -> Result<Self, GameError> {
        Self::new(LineKind::Column, index)
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Cells of the line: columns 0..9 for a row, rows 0..9 for a column.
    pub fn cells(&self) -> impl Iterator<Item = Coordinate> {
        let (kind, index) = (self.kind, self.index);
        (0..BOARD_SIZE).map(move |i| match kind {
            LineKind::Row => Coordinate::new(index, i),
            LineKind::Column => Coordinate::new(i, index),
        })
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LineKind::Row => write!(f, "row {}", self.index),
            LineKind::Column => write!(f, "column {}", self.index),
        }
    }
}

//! Ship definitions and their footprint on the grid.

use core::fmt;
use core::str::FromStr;

use crate::cellset::CellSet;
use crate::common::PlacementError;
use crate::config::FLEET;
use crate::coord::Coordinate;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    #[cfg_attr(feature = "service", serde(rename = "H", alias = "horizontal"))]
    Horizontal,
    #[cfg_attr(feature = "service", serde(rename = "V", alias = "vertical"))]
    Vertical,
}

impl Orientation {
    /// Row and column step from one segment to the next.
    fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// The five ship types of a fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipKind {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipKind {
    pub const fn name(self) -> &'static str {
        match self {
            ShipKind::Carrier => "Carrier",
            ShipKind::Battleship => "Battleship",
            ShipKind::Cruiser => "Cruiser",
            ShipKind::Submarine => "Submarine",
            ShipKind::Destroyer => "Destroyer",
        }
    }

    pub const fn size(self) -> usize {
        match self {
            ShipKind::Carrier => 5,
            ShipKind::Battleship => 4,
            ShipKind::Cruiser | ShipKind::Submarine => 3,
            ShipKind::Destroyer => 2,
        }
    }

    /// Position of this kind in [`FLEET`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        FLEET
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for ShipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShipKind {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipKind::from_name(s).ok_or_else(|| PlacementError::UnknownShip(s.to_string()))
    }
}

/// Cells covered by a ship of `size` starting at `origin`, in order of
/// increasing column (horizontal) or row (vertical). Cells past the edge are
/// returned as-is and fail [`Coordinate::in_bounds`].
pub fn compute_cells(origin: Coordinate, size: usize, orientation: Orientation) -> Vec<Coordinate> {
    let (dr, dc) = orientation.step();
    (0..size)
        .map(|i| Coordinate::new(origin.row.saturating_add(dr * i), origin.col.saturating_add(dc * i)))
        .collect()
}

/// A ship placed on the board, with hits tracked in a `CellSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    kind: ShipKind,
    origin: Coordinate,
    orientation: Orientation,
    cells: Vec<Coordinate>,
    mask: CellSet,
    hits: CellSet,
}

impl Ship {
    /// Place a ship of `kind` at `origin`; fails if any segment leaves the board.
    pub fn new(
        kind: ShipKind,
        origin: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, PlacementError> {
        let cells = compute_cells(origin, kind.size(), orientation);
        if !cells.iter().all(Coordinate::in_bounds) {
            return Err(PlacementError::OutOfBounds { kind, origin });
        }
        let mask = cells.iter().copied().collect();
        Ok(Ship {
            kind,
            origin,
            orientation,
            cells,
            mask,
            hits: CellSet::new(),
        })
    }

    pub fn kind(&self) -> ShipKind {
        self.kind
    }

    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied cells in placement order.
    pub fn cells(&self) -> &[Coordinate] {
        &self.cells
    }

    /// Occupancy mask of the ship on the board.
    pub fn mask(&self) -> CellSet {
        self.mask
    }

    pub fn hits(&self) -> CellSet {
        self.hits
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.mask.contains(coord)
    }

    /// Record a hit at `coord`. Returns `true` if the ship occupies it.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        if self.contains(coord) {
            self.hits.insert(coord);
            true
        } else {
            false
        }
    }

    /// All segments hit.
    pub fn is_sunk(&self) -> bool {
        self.hits == self.mask
    }
}

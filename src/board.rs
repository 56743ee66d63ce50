//! Board state for one side: ship placements, hits and misses.

use core::fmt;

use crate::cellset::CellSet;
use crate::common::{GameError, PlacementError, ShotMark};
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS};
use crate::coord::Coordinate;
use crate::placement::ShipPlacement;
use crate::ship::{Ship, ShipKind};

/// A ship that has just been sunk, with every cell it occupied.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct SunkShip {
    pub kind: ShipKind,
    pub cells: Vec<Coordinate>,
}

/// Outcome of [`Board::receive_shot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotResult {
    pub hit: bool,
    /// Set only by the shot that struck the last intact segment.
    pub sunk: Option<SunkShip>,
}

/// Status of one ship, as the owning side sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStatus {
    pub kind: ShipKind,
    pub placed: bool,
    pub hits: usize,
    pub sunk: bool,
}

/// What an attacker may legitimately know about a board: its own shot
/// outcomes plus the cells of ships it has sunk. Ship positions are never
/// part of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotHistory {
    pub hits: CellSet,
    pub misses: CellSet,
    /// Cells of ships already sunk.
    pub sunk: CellSet,
    /// Ships still afloat.
    pub remaining: Vec<ShipKind>,
}

impl ShotHistory {
    /// History of a board nobody has shot at yet.
    pub fn fresh() -> Self {
        Self {
            hits: CellSet::new(),
            misses: CellSet::new(),
            sunk: CellSet::new(),
            remaining: FLEET.to_vec(),
        }
    }

    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.hits.contains(coord) || self.misses.contains(coord)
    }

    pub fn shots(&self) -> CellSet {
        self.hits | self.misses
    }

    pub fn unshot(&self) -> CellSet {
        !self.shots()
    }

    /// Hits that do not belong to a sunk ship yet.
    pub fn open_hits(&self) -> CellSet {
        self.hits & !self.sunk
    }

    /// Sizes of the ships still afloat.
    pub fn remaining_sizes(&self) -> Vec<usize> {
        self.remaining.iter().map(|kind| kind.size()).collect()
    }
}

/// One side's 10×10 grid.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    ships: [Option<Ship>; NUM_SHIPS],
    occupancy: CellSet,
    hits: CellSet,
    misses: CellSet,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships placed, nothing shot).
    pub fn new() -> Self {
        Board {
            ships: Default::default(),
            occupancy: CellSet::new(),
            hits: CellSet::new(),
            misses: CellSet::new(),
        }
    }

    /// True iff every cell is in bounds and unoccupied.
    pub fn can_place(&self, cells: &[Coordinate]) -> bool {
        cells
            .iter()
            .all(|&c| c.in_bounds() && !self.occupancy.contains(c))
    }

    /// Place `ship`. The board is untouched on error.
    pub fn place(&mut self, ship: Ship) -> Result<(), PlacementError> {
        let kind = ship.kind();
        if self.ships[kind.index()].is_some() {
            return Err(PlacementError::DuplicateShip(kind));
        }
        if !self.can_place(ship.cells()) {
            return Err(PlacementError::Overlap { kind });
        }
        self.occupancy |= ship.mask();
        self.ships[kind.index()] = Some(ship);
        Ok(())
    }

    /// Apply a shot. A repeated shot fails with [`GameError::DuplicateShot`]
    /// and changes nothing.
    pub fn receive_shot(&mut self, coord: Coordinate) -> Result<ShotResult, GameError> {
        if !coord.in_bounds() {
            return Err(GameError::InvalidCoordinate {
                row: coord.row,
                col: coord.col,
            });
        }
        if self.is_shot(coord) {
            return Err(GameError::DuplicateShot(coord));
        }
        if !self.occupancy.contains(coord) {
            self.misses.insert(coord);
            return Ok(ShotResult {
                hit: false,
                sunk: None,
            });
        }

        let ship = self
            .ships
            .iter_mut()
            .flatten()
            .find(|ship| ship.contains(coord))
            .ok_or_else(|| GameError::Internal(format!("occupied cell {coord} has no ship")))?;
        self.hits.insert(coord);
        ship.register_hit(coord);
        let sunk = ship.is_sunk().then(|| SunkShip {
            kind: ship.kind(),
            cells: ship.cells().to_vec(),
        });
        Ok(ShotResult { hit: true, sunk })
    }

    /// Returns `true` when a full fleet is placed and every ship is sunk.
    pub fn all_sunk(&self) -> bool {
        self.is_fleet_complete() && self.ships.iter().flatten().all(Ship::is_sunk)
    }

    pub fn is_fleet_complete(&self) -> bool {
        self.ships.iter().all(Option::is_some)
    }

    pub fn shot_at(&self, coord: Coordinate) -> ShotMark {
        if self.hits.contains(coord) {
            ShotMark::Hit
        } else if self.misses.contains(coord) {
            ShotMark::Miss
        } else {
            ShotMark::Unknown
        }
    }

    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.shot_at(coord) != ShotMark::Unknown
    }

    pub fn ship(&self, kind: ShipKind) -> Option<&Ship> {
        self.ships[kind.index()].as_ref()
    }

    /// Placed ships in fleet order.
    pub fn ships(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter().flatten()
    }

    pub fn ship_at(&self, coord: Coordinate) -> Option<ShipKind> {
        self.ships()
            .find(|ship| ship.contains(coord))
            .map(Ship::kind)
    }

    /// Board occupancy mask of all ships.
    pub fn occupancy(&self) -> CellSet {
        self.occupancy
    }

    pub fn hits(&self) -> CellSet {
        self.hits
    }

    pub fn misses(&self) -> CellSet {
        self.misses
    }

    pub fn ship_statuses(&self) -> Vec<ShipStatus> {
        FLEET
            .iter()
            .map(|&kind| match self.ship(kind) {
                Some(ship) => ShipStatus {
                    kind,
                    placed: true,
                    hits: ship.hits().len(),
                    sunk: ship.is_sunk(),
                },
                None => ShipStatus {
                    kind,
                    placed: false,
                    hits: 0,
                    sunk: false,
                },
            })
            .collect()
    }

    /// Sunk ships with their cells, in fleet order.
    pub fn sunk_ships(&self) -> Vec<SunkShip> {
        self.ships()
            .filter(|ship| ship.is_sunk())
            .map(|ship| SunkShip {
                kind: ship.kind(),
                cells: ship.cells().to_vec(),
            })
            .collect()
    }

    /// Kinds not sunk yet, placed or not.
    pub fn remaining_kinds(&self) -> Vec<ShipKind> {
        FLEET
            .iter()
            .copied()
            .filter(|&kind| !self.ship(kind).is_some_and(Ship::is_sunk))
            .collect()
    }

    /// The attacker's view of this board.
    pub fn shot_history(&self) -> ShotHistory {
        let sunk = self
            .ships()
            .filter(|ship| ship.is_sunk())
            .fold(CellSet::new(), |acc, ship| acc | ship.mask());
        ShotHistory {
            hits: self.hits,
            misses: self.misses,
            sunk,
            remaining: self.remaining_kinds(),
        }
    }

    /// Current ship positions as placements, e.g. to hand a generated fleet
    /// to a session.
    pub fn placements(&self) -> Vec<ShipPlacement> {
        self.ships()
            .map(|ship| ShipPlacement::new(ship.kind(), ship.origin(), ship.orientation()))
            .collect()
    }

    /// Ship kind per cell, row by row.
    pub fn grid(&self) -> [[Option<ShipKind>; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for ship in self.ships() {
            for cell in ship.cells() {
                grid[cell.row][cell.col] = Some(ship.kind());
            }
        }
        grid
    }

    /// Shot marks per cell, row by row.
    pub fn shot_grid(&self) -> [[ShotMark; BOARD_SIZE]; BOARD_SIZE] {
        let mut grid = [[ShotMark::Unknown; BOARD_SIZE]; BOARD_SIZE];
        for coord in Coordinate::all() {
            grid[coord.row][coord.col] = self.shot_at(coord);
        }
        grid
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupancy: {:?},\n  hits: {:?},\n  misses: {:?},\n  ships: {:?}\n}}",
            self.occupancy,
            self.hits,
            self.misses,
            self.ship_statuses()
        )
    }
}

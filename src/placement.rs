//! Fleet validation and random fleet generation.

use log::{debug, error};
use rand::Rng;

use crate::board::Board;
use crate::common::PlacementError;
use crate::config::{BOARD_SIZE, FLEET, NUM_SHIPS, PLACEMENT_ATTEMPTS};
use crate::coord::Coordinate;
use crate::ship::{Orientation, Ship, ShipKind};

/// A requested position for one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipPlacement {
    pub kind: ShipKind,
    pub origin: Coordinate,
    pub orientation: Orientation,
}

impl ShipPlacement {
    pub fn new(kind: ShipKind, origin: Coordinate, orientation: Orientation) -> Self {
        Self {
            kind,
            origin,
            orientation,
        }
    }
}

/// Build a board from a complete fleet: one ship of each kind, all in bounds,
/// none overlapping. Works on a fresh board, so a rejected fleet leaves no
/// trace anywhere.
pub fn validate_fleet(placements: &[ShipPlacement]) -> Result<Board, PlacementError> {
    if placements.len() != NUM_SHIPS {
        return Err(PlacementError::FleetComposition {
            expected: NUM_SHIPS,
            found: placements.len(),
        });
    }
    let mut board = Board::new();
    for placement in placements {
        let ship = Ship::new(placement.kind, placement.origin, placement.orientation)?;
        board.place(ship)?;
    }
    debug_assert!(board.is_fleet_complete());
    Ok(board)
}

/// Returns a random ship of `kind` that fits on `board` without overlap.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    kind: ShipKind,
    rng: &mut R,
) -> Result<Ship, PlacementError> {
    let len = kind.size();
    for _ in 0..PLACEMENT_ATTEMPTS {
        let orientation = if rng.random() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let (max_r, max_c) = match orientation {
            Orientation::Horizontal => (BOARD_SIZE - 1, BOARD_SIZE - len),
            Orientation::Vertical => (BOARD_SIZE - len, BOARD_SIZE - 1),
        };
        let origin = Coordinate::new(rng.random_range(0..=max_r), rng.random_range(0..=max_c));
        let ship = Ship::new(kind, origin, orientation)?;
        if board.can_place(ship.cells()) {
            return Ok(ship);
        }
    }
    error!("random placement of {kind} exhausted {PLACEMENT_ATTEMPTS} attempts");
    Err(PlacementError::PlacementExhausted {
        kind,
        attempts: PLACEMENT_ATTEMPTS,
    })
}

/// Randomly place every ship still missing from `board`, in fleet order.
pub fn complete_fleet<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<(), PlacementError> {
    for kind in FLEET {
        if board.ship(kind).is_some() {
            continue;
        }
        let ship = random_placement(board, kind, rng)?;
        debug!("placed {kind} at {} {:?}", ship.origin(), ship.orientation());
        board.place(ship)?;
    }
    Ok(())
}

/// A full, randomly placed fleet on a new board.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> Result<Board, PlacementError> {
    let mut board = Board::new();
    complete_fleet(&mut board, rng)?;
    Ok(board)
}

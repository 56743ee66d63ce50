use log::debug;

use crate::board::{Board, SunkShip};
use crate::common::GameError;
use crate::coord::Coordinate;

/// Result of a single resolved shot against a defender's board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotReport {
    pub coord: Coordinate,
    pub hit: bool,
    /// The ship this shot finished off, with its full cell list.
    pub sunk: Option<SunkShip>,
    /// The defender has no ship left afloat.
    pub fleet_destroyed: bool,
}

/// Fire at `coord` on the defender's `board`. Outcomes are permanent; a
/// repeated coordinate is rejected without touching the board.
pub fn resolve_shot(board: &mut Board, coord: Coordinate) -> Result<ShotReport, GameError> {
    let result = board.receive_shot(coord)?;
    debug!(
        "shot at {coord}: {}{}",
        if result.hit { "hit" } else { "miss" },
        result
            .sunk
            .as_ref()
            .map(|s| format!(", sunk {}", s.kind))
            .unwrap_or_default()
    );
    Ok(ShotReport {
        coord,
        hit: result.hit,
        sunk: result.sunk,
        fleet_destroyed: board.all_sunk(),
    })
}

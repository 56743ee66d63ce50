//! Air strike: a single-use volley over a whole row or column.

use log::{debug, info};

use crate::board::{Board, SunkShip};
use crate::common::GameError;
use crate::coord::{Coordinate, Line, Side};
use crate::shot::resolve_shot;

/// Outcome for one cell of a volley.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "service", serde(rename_all = "snake_case"))]
pub enum CellOutcome {
    Hit,
    Miss,
    /// Shot earlier in the game; left alone.
    AlreadyShot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeCell {
    pub coord: Coordinate,
    pub outcome: CellOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirStrikeReport {
    pub line: Line,
    /// One entry per cell of the line, in line order.
    pub cells: Vec<StrikeCell>,
    /// Every ship the volley finished off.
    pub sunk: Vec<SunkShip>,
    pub fleet_destroyed: bool,
}

impl AirStrikeReport {
    pub fn hit_count(&self) -> usize {
        self.count(CellOutcome::Hit)
    }

    /// New shots actually resolved, i.e. cells not skipped.
    pub fn shots_fired(&self) -> usize {
        self.cells.len() - self.count(CellOutcome::AlreadyShot)
    }

    fn count(&self, outcome: CellOutcome) -> usize {
        self.cells.iter().filter(|c| c.outcome == outcome).count()
    }
}

/// Fire at every cell of `line` on the defender's board, skipping cells that
/// were already shot.
pub fn resolve_air_strike(board: &mut Board, line: Line) -> Result<AirStrikeReport, GameError> {
    let mut cells = Vec::new();
    let mut sunk = Vec::new();
    for coord in line.cells() {
        if board.is_shot(coord) {
            cells.push(StrikeCell {
                coord,
                outcome: CellOutcome::AlreadyShot,
            });
            continue;
        }
        let report = resolve_shot(board, coord)?;
        let outcome = if report.hit {
            CellOutcome::Hit
        } else {
            CellOutcome::Miss
        };
        cells.push(StrikeCell { coord, outcome });
        sunk.extend(report.sunk);
    }
    let report = AirStrikeReport {
        line,
        cells,
        sunk,
        fleet_destroyed: board.all_sunk(),
    };
    debug!(
        "air strike on {line}: {} shots, {} hits, {} sunk",
        report.shots_fired(),
        report.hit_count(),
        report.sunk.len()
    );
    Ok(report)
}

/// Per-side availability of the air strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct AirStrikes {
    pub player: bool,
    pub opponent: bool,
}

impl Default for AirStrikes {
    fn default() -> Self {
        Self {
            player: true,
            opponent: true,
        }
    }
}

impl AirStrikes {
    pub fn available(&self, side: Side) -> bool {
        match side {
            Side::Player => self.player,
            Side::Opponent => self.opponent,
        }
    }

    /// Spend `side`'s air strike. Once spent it never comes back.
    pub fn take(&mut self, side: Side) -> Result<(), GameError> {
        let slot = match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        };
        if !*slot {
            return Err(GameError::AirStrikeUnavailable);
        }
        *slot = false;
        info!("{side:?} used the air strike");
        Ok(())
    }
}

//! Common types for Battleship: engine errors and per-cell shot marks.

use thiserror::Error;

use crate::coord::{Coordinate, LineKind};
use crate::ship::ShipKind;

/// What a side knows about one cell of the other side's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "service", serde(rename_all = "lowercase"))]
pub enum ShotMark {
    /// Not shot yet.
    #[default]
    Unknown,
    Hit,
    Miss,
}

/// Errors raised while placing ships.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("{kind} at {origin} does not fit on the board")]
    OutOfBounds { kind: ShipKind, origin: Coordinate },
    #[error("{kind} overlaps another ship")]
    Overlap { kind: ShipKind },
    #[error("{0} is already placed")]
    DuplicateShip(ShipKind),
    #[error("unknown ship name {0:?}")]
    UnknownShip(String),
    #[error("a fleet needs exactly {expected} ships, got {found}")]
    FleetComposition { expected: usize, found: usize },
    /// Random placement ran out of attempts. Only reachable through a logic
    /// bug, never through caller input.
    #[error("could not place {kind} after {attempts} random attempts")]
    PlacementExhausted { kind: ShipKind, attempts: usize },
}

/// Errors returned by game operations.
///
/// Every variant except [`GameError::Internal`] and an exhausted placement is
/// a rejected request: the session is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid placement: {0}")]
    Placement(#[from] PlacementError),
    #[error("cell {0} was already shot")]
    DuplicateShot(Coordinate),
    #[error("coordinate ({row}, {col}) is off the board")]
    InvalidCoordinate { row: usize, col: usize },
    #[error("{kind:?} index {index} is off the board")]
    InvalidTarget { kind: LineKind, index: usize },
    #[error("it is not your turn")]
    NotYourTurn,
    #[error("both fleets must be placed before play starts")]
    NotReady,
    #[error("the game has already started")]
    AlreadyStarted,
    #[error("the game is over")]
    GameOver,
    #[error("the air strike has already been used")]
    AirStrikeUnavailable,
    #[error("no game session with id {0}")]
    SessionNotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl GameError {
    /// Internal invariant violations; everything else is a user error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            GameError::Internal(_) | GameError::Placement(PlacementError::PlacementExhausted { .. })
        )
    }

    /// Stable snake_case identifier used in error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::Placement(_) => "placement_error",
            GameError::DuplicateShot(_) => "duplicate_shot",
            GameError::InvalidCoordinate { .. } => "invalid_coordinate",
            GameError::InvalidTarget { .. } => "invalid_target",
            GameError::NotYourTurn => "not_your_turn",
            GameError::NotReady => "not_ready",
            GameError::AlreadyStarted => "already_started",
            GameError::GameOver => "game_over",
            GameError::AirStrikeUnavailable => "air_strike_unavailable",
            GameError::SessionNotFound(_) => "session_not_found",
            GameError::Internal(_) => "internal",
        }
    }
}

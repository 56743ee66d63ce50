//! Request/response contract between the engine and a presentation layer.
//!
//! Shapes are plain serde types; the collaborator picks the wire encoding.
//! The bundled driver speaks one JSON object per line.

use serde::{Deserialize, Serialize};

use crate::ai::Difficulty;
use crate::air_strike::{AirStrikeReport, StrikeCell};
use crate::board::SunkShip;
use crate::common::{GameError, PlacementError};
use crate::coord::{Coordinate, LineKind, Side};
use crate::game::{AirStrikeTurn, GameStateView, TurnReport};
use crate::placement::ShipPlacement;
use crate::ship::{Orientation, ShipKind};
use crate::shot::ShotReport;

pub type SessionId = String;

/// One ship as submitted by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipSpec {
    pub name: String,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl TryFrom<&ShipSpec> for ShipPlacement {
    type Error = PlacementError;

    fn try_from(ship: &ShipSpec) -> Result<Self, Self::Error> {
        let kind: ShipKind = ship.name.parse()?;
        Ok(ShipPlacement::new(
            kind,
            Coordinate::new(ship.row, ship.col),
            ship.orientation,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    NewGame {
        #[serde(default)]
        difficulty: Difficulty,
        /// Session of the same match to discard.
        #[serde(default)]
        replaces: Option<SessionId>,
    },
    PlaceShips {
        session_id: SessionId,
        ships: Vec<ShipSpec>,
    },
    FireShot {
        session_id: SessionId,
        row: usize,
        col: usize,
    },
    FireAirStrike {
        session_id: SessionId,
        target_type: LineKind,
        index: usize,
    },
    GetState {
        session_id: SessionId,
    },
    EndGame {
        session_id: SessionId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    GameCreated { session_id: SessionId },
    State { game_state: GameStateView },
    Shot(ShotResponse),
    AirStrike(AirStrikeResponse),
    GameEnded { session_id: SessionId },
    Error { kind: String, message: String },
}

impl From<&GameError> for Response {
    fn from(err: &GameError) -> Self {
        Response::Error {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one shot; `ai_shot` nests the computer's reply in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotResponse {
    pub row: usize,
    pub col: usize,
    pub hit: bool,
    pub ship_sunk: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ship_cells: Option<Vec<Coordinate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_shot: Option<Box<ShotResponse>>,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_state: Option<GameStateView>,
}

impl ShotResponse {
    /// A single shot, without reply or state attached.
    pub fn from_report(report: &ShotReport) -> Self {
        Self {
            row: report.coord.row,
            col: report.coord.col,
            hit: report.hit,
            ship_sunk: report.sunk.is_some(),
            ship_name: report.sunk.as_ref().map(|s| s.kind.name().to_string()),
            ship_cells: report.sunk.as_ref().map(|s| s.cells.clone()),
            ai_shot: None,
            game_over: report.fleet_destroyed,
            winner: None,
            game_state: None,
        }
    }

    pub fn from_turn(turn: &TurnReport, state: GameStateView) -> Self {
        let mut response = Self::from_report(&turn.player);
        response.ai_shot = turn
            .ai
            .as_ref()
            .map(|ai| Box::new(Self::from_report(ai)));
        response.game_over = turn.game_over();
        response.winner = turn.winner;
        response.game_state = Some(state);
        response
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirStrikeResponse {
    pub target_type: LineKind,
    pub target_index: usize,
    pub results: Vec<StrikeCell>,
    pub hit_count: usize,
    pub ships_sunk: Vec<SunkShip>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_shot: Option<ShotResponse>,
    pub air_strike_available: bool,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Side>,
    pub game_state: GameStateView,
}

impl AirStrikeResponse {
    pub fn from_turn(turn: &AirStrikeTurn, state: GameStateView) -> Self {
        let strike: &AirStrikeReport = &turn.strike;
        Self {
            target_type: strike.line.kind(),
            target_index: strike.line.index(),
            results: strike.cells.clone(),
            hit_count: strike.hit_count(),
            ships_sunk: strike.sunk.clone(),
            ai_shot: turn.ai.as_ref().map(ShotResponse::from_report),
            air_strike_available: state.air_strike_available.player,
            game_over: turn.game_over(),
            winner: turn.winner,
            game_state: state,
        }
    }
}

/// Engine operations as seen by a transport. Implementations serialize
/// requests per session.
#[async_trait::async_trait]
pub trait GameApi: Send + Sync {
    /// Start a session, dropping `replaces` if given. Callers should pass the
    /// session they abandon or call [`GameApi::end_game`]; implementations may
    /// bound how many sessions stay alive.
    async fn new_game(
        &self,
        difficulty: Difficulty,
        replaces: Option<SessionId>,
    ) -> Result<SessionId, GameError>;

    /// Validate and place the player's fleet, then start play.
    async fn place_ships(&self, session_id: &str, ships: Vec<ShipSpec>) -> Result<GameStateView, GameError>;

    async fn fire_shot(&self, session_id: &str, row: usize, col: usize) -> Result<ShotResponse, GameError>;

    async fn fire_air_strike(
        &self,
        session_id: &str,
        target_type: LineKind,
        index: usize,
    ) -> Result<AirStrikeResponse, GameError>;

    async fn get_state(&self, session_id: &str) -> Result<GameStateView, GameError>;

    async fn end_game(&self, session_id: &str) -> Result<(), GameError>;
}

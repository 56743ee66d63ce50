//! Game session and turn controller.
//!
//! A [`GameSession`] owns both boards, the computer's targeting memory and
//! the session RNG. Every public operation validates completely before it
//! mutates anything, so a rejected request leaves the session unchanged.

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::Difficulty;
use crate::air_strike::{resolve_air_strike, AirStrikeReport, AirStrikes, CellOutcome};
use crate::board::{Board, SunkShip};
use crate::common::{GameError, ShotMark};
use crate::config::BOARD_SIZE;
use crate::coord::{Coordinate, Line, Side};
use crate::placement::{random_fleet, validate_fleet, ShipPlacement};
use crate::player::Player;
use crate::player_ai::AiPlayer;
use crate::ship::ShipKind;
use crate::shot::{resolve_shot, ShotReport};

/// Lifecycle of a session. `Finished` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "service", serde(rename_all = "snake_case"))]
pub enum GameStatus {
    Setup,
    InProgress,
    Finished,
}

/// A player shot and the computer's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub player: ShotReport,
    /// Absent when the player's shot ended the game.
    pub ai: Option<ShotReport>,
    pub winner: Option<Side>,
}

impl TurnReport {
    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// A player air strike and the computer's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirStrikeTurn {
    pub strike: AirStrikeReport,
    pub ai: Option<ShotReport>,
    pub winner: Option<Side>,
}

impl AirStrikeTurn {
    pub fn game_over(&self) -> bool {
        self.winner.is_some()
    }
}

/// Everything the human side may see. Computer ship positions appear only
/// once sunk.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "service", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStateView {
    pub session_id: String,
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub turn: Side,
    pub game_over: bool,
    pub winner: Option<Side>,
    pub player_grid: [[Option<ShipKind>; BOARD_SIZE]; BOARD_SIZE],
    pub ai_shots_on_player: [[ShotMark; BOARD_SIZE]; BOARD_SIZE],
    pub player_shots_on_ai: [[ShotMark; BOARD_SIZE]; BOARD_SIZE],
    pub sunk_ai_ships: Vec<SunkShip>,
    pub player_hits: usize,
    pub ai_hits: usize,
    pub remaining_player_ships: Vec<ShipKind>,
    pub remaining_ai_ships: Vec<ShipKind>,
    pub air_strike_available: AirStrikes,
}

pub struct GameSession {
    id: String,
    difficulty: Difficulty,
    player_board: Board,
    opponent_board: Board,
    turn: Side,
    air_strikes: AirStrikes,
    status: GameStatus,
    winner: Option<Side>,
    ai: AiPlayer,
    rng: SmallRng,
    player_moves: Vec<Coordinate>,
    ai_moves: Vec<Coordinate>,
}

impl GameSession {
    /// Fresh session in `Setup`: empty player board, random computer fleet,
    /// both air strikes available.
    pub fn new(id: impl Into<String>, difficulty: Difficulty, mut rng: SmallRng) -> Result<Self, GameError> {
        let id = id.into();
        let opponent_board = random_fleet(&mut rng)?;
        info!("session {id}: created ({difficulty:?})");
        Ok(Self {
            id,
            difficulty,
            player_board: Board::new(),
            opponent_board,
            turn: Side::Player,
            air_strikes: AirStrikes::default(),
            status: GameStatus::Setup,
            winner: None,
            ai: AiPlayer::new(difficulty),
            rng,
            player_moves: Vec::new(),
            ai_moves: Vec::new(),
        })
    }

    /// Reproducible session.
    pub fn with_seed(id: impl Into<String>, difficulty: Difficulty, seed: u64) -> Result<Self, GameError> {
        Self::new(id, difficulty, SmallRng::seed_from_u64(seed))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Finished
    }

    pub fn air_strikes(&self) -> AirStrikes {
        self.air_strikes
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    /// The computer's board including ship positions. Never hand this to the
    /// human side; use [`GameSession::state`] instead.
    pub fn opponent_board(&self) -> &Board {
        &self.opponent_board
    }

    pub fn player_moves(&self) -> &[Coordinate] {
        &self.player_moves
    }

    pub fn ai_moves(&self) -> &[Coordinate] {
        &self.ai_moves
    }

    /// Replace the player's fleet. Only legal during setup.
    pub fn place_fleet(&mut self, placements: &[ShipPlacement]) -> Result<(), GameError> {
        self.ensure_setup()?;
        let board = validate_fleet(placements).inspect_err(|e| {
            warn!("session {}: fleet rejected: {e}", self.id);
        })?;
        self.player_board = board;
        info!("session {}: player fleet placed", self.id);
        Ok(())
    }

    /// Fill the player's board with a random fleet. Only legal during setup.
    pub fn auto_place_fleet(&mut self) -> Result<(), GameError> {
        self.ensure_setup()?;
        self.player_board = random_fleet(&mut self.rng)?;
        info!("session {}: player fleet placed randomly", self.id);
        Ok(())
    }

    /// `Setup -> InProgress` once both fleets are complete. The player moves first.
    pub fn start_play(&mut self) -> Result<(), GameError> {
        self.ensure_setup()?;
        if !self.player_board.is_fleet_complete() || !self.opponent_board.is_fleet_complete() {
            return Err(GameError::NotReady);
        }
        self.status = GameStatus::InProgress;
        self.turn = Side::Player;
        info!("session {}: play started", self.id);
        Ok(())
    }

    /// Fire at the computer's board; the computer replies in the same call
    /// unless the shot ended the game.
    pub fn fire_shot(&mut self, coord: Coordinate) -> Result<TurnReport, GameError> {
        self.ensure_player_turn()?;
        let player = resolve_shot(&mut self.opponent_board, coord).inspect_err(|e| {
            warn!("session {}: shot at {coord} rejected: {e}", self.id);
        })?;
        self.player_moves.push(coord);
        let ai = self.finish_player_turn()?;
        Ok(TurnReport {
            player,
            ai,
            winner: self.winner,
        })
    }

    /// Spend the player's air strike on `line`. Replaces the player's shot for
    /// the round; the computer replies as after a normal shot.
    pub fn fire_air_strike(&mut self, line: Line) -> Result<AirStrikeTurn, GameError> {
        self.ensure_player_turn()?;
        if !self.air_strikes.available(Side::Player) {
            warn!("session {}: air strike already used", self.id);
            return Err(GameError::AirStrikeUnavailable);
        }
        let strike = resolve_air_strike(&mut self.opponent_board, line)?;
        self.air_strikes.take(Side::Player)?;
        self.player_moves.extend(
            strike
                .cells
                .iter()
                .filter(|cell| cell.outcome != CellOutcome::AlreadyShot)
                .map(|cell| cell.coord),
        );
        let ai = self.finish_player_turn()?;
        Ok(AirStrikeTurn {
            strike,
            ai,
            winner: self.winner,
        })
    }

    /// Settle the game if a fleet is gone. The player's win is checked first.
    /// Once finished the winner never changes.
    pub fn check_winner(&mut self) -> Option<Side> {
        if self.status != GameStatus::InProgress {
            return self.winner;
        }
        let winner = if self.opponent_board.all_sunk() {
            Some(Side::Player)
        } else if self.player_board.all_sunk() {
            Some(Side::Opponent)
        } else {
            None
        };
        if let Some(side) = winner {
            self.status = GameStatus::Finished;
            self.winner = Some(side);
            info!("session {}: {side:?} wins", self.id);
        }
        winner
    }

    /// Snapshot for the human side.
    pub fn state(&self) -> GameStateView {
        GameStateView {
            session_id: self.id.clone(),
            difficulty: self.difficulty,
            status: self.status,
            turn: self.turn,
            game_over: self.is_over(),
            winner: self.winner,
            player_grid: self.player_board.grid(),
            ai_shots_on_player: self.player_board.shot_grid(),
            player_shots_on_ai: self.opponent_board.shot_grid(),
            sunk_ai_ships: self.opponent_board.sunk_ships(),
            player_hits: self.opponent_board.hits().len(),
            ai_hits: self.player_board.hits().len(),
            remaining_player_ships: self.player_board.remaining_kinds(),
            remaining_ai_ships: self.opponent_board.remaining_kinds(),
            air_strike_available: self.air_strikes,
        }
    }

    fn ensure_setup(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::Setup => Ok(()),
            GameStatus::InProgress => Err(GameError::AlreadyStarted),
            GameStatus::Finished => Err(GameError::GameOver),
        }
    }

    fn ensure_player_turn(&self) -> Result<(), GameError> {
        match self.status {
            GameStatus::Setup => Err(GameError::NotReady),
            GameStatus::Finished => Err(GameError::GameOver),
            GameStatus::InProgress if self.turn != Side::Player => Err(GameError::NotYourTurn),
            GameStatus::InProgress => Ok(()),
        }
    }

    fn finish_player_turn(&mut self) -> Result<Option<ShotReport>, GameError> {
        // A winning volley ends the game with the turn still on the player.
        if self.check_winner().is_some() {
            return Ok(None);
        }
        self.turn = Side::Opponent;
        let reply = self.computer_turn()?;
        if self.check_winner().is_none() {
            self.turn = Side::Player;
        }
        Ok(Some(reply))
    }

    fn computer_turn(&mut self) -> Result<ShotReport, GameError> {
        let history = self.player_board.shot_history();
        let target = self
            .ai
            .select_target(&mut self.rng, &history)
            .ok_or_else(|| GameError::Internal("computer found no cell to shoot".to_string()))?;
        let report = resolve_shot(&mut self.player_board, target)?;
        self.ai_moves.push(target);
        self.ai
            .handle_shot_result(&report, &self.player_board.shot_history());
        Ok(report)
    }
}

use rand::rngs::SmallRng;

use crate::air_strike::AirStrikeReport;
use crate::board::ShotHistory;
use crate::common::PlacementError;
use crate::coord::Coordinate;
use crate::placement::ShipPlacement;
use crate::shot::ShotReport;

/// Interface implemented by anything that plays one side of a match.
///
/// A Player is responsible for:
/// - Choosing where its fleet goes
/// - Selecting targets on the other side's board
/// - Learning from the outcome of its shots
pub trait Player {
    /// Choose a complete fleet.
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, PlacementError>;

    /// Choose the next target given what is known about the other board.
    fn select_target(&mut self, rng: &mut SmallRng, history: &ShotHistory) -> Option<Coordinate>;

    /// Inform the player of the result of its last shot.
    fn handle_shot_result(&mut self, _report: &ShotReport, _history: &ShotHistory) {}

    /// Inform the player of the result of its air strike.
    fn handle_air_strike(&mut self, _report: &AirStrikeReport, _history: &ShotHistory) {}
}

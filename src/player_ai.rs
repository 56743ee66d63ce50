use rand::rngs::SmallRng;

use crate::ai::{Difficulty, Targeting};
use crate::air_strike::AirStrikeReport;
use crate::board::ShotHistory;
use crate::common::PlacementError;
use crate::coord::Coordinate;
use crate::placement::{random_fleet, ShipPlacement};
use crate::player::Player;
use crate::shot::ShotReport;

/// Computer player: random fleet, hunt/target shooting.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    targeting: Targeting,
}

impl AiPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            targeting: Targeting::new(difficulty),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.targeting.difficulty()
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }
}

impl Player for AiPlayer {
    fn place_ships(&mut self, rng: &mut SmallRng) -> Result<Vec<ShipPlacement>, PlacementError> {
        Ok(random_fleet(rng)?.placements())
    }

    fn select_target(&mut self, rng: &mut SmallRng, history: &ShotHistory) -> Option<Coordinate> {
        self.targeting.select_target(rng, history)
    }

    fn handle_shot_result(&mut self, report: &ShotReport, history: &ShotHistory) {
        self.targeting.observe(report, history);
    }

    fn handle_air_strike(&mut self, report: &AirStrikeReport, history: &ShotHistory) {
        self.targeting.observe_strike(report, history);
    }
}

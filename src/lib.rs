mod ai;
mod air_strike;
mod board;
mod cellset;
mod common;
mod config;
mod coord;
mod game;
mod logging;
mod placement;
mod player;
mod player_ai;
mod ship;
mod shot;
#[cfg(feature = "service")]
pub mod protocol;
#[cfg(feature = "service")]
pub mod skeleton;
#[cfg(feature = "service")]
mod store;

pub use ai::*;
pub use air_strike::*;
pub use board::*;
pub use cellset::*;
pub use common::*;
pub use config::*;
pub use coord::*;
pub use game::*;
pub use logging::init_logging;
pub use placement::*;
pub use player::*;
pub use player_ai::*;
pub use ship::*;
pub use shot::*;
#[cfg(feature = "service")]
pub use protocol::*;
#[cfg(feature = "service")]
pub use skeleton::*;
#[cfg(feature = "service")]
pub use store::*;

use crate::ship::ShipKind;

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;

/// The fleet every side places, in placement order.
pub const FLEET: [ShipKind; NUM_SHIPS] = [
    ShipKind::Carrier,
    ShipKind::Battleship,
    ShipKind::Cruiser,
    ShipKind::Submarine,
    ShipKind::Destroyer,
];

/// Total number of ship segments in a full fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Upper bound on random origin/orientation samples per ship before random
/// placement gives up.
pub const PLACEMENT_ATTEMPTS: usize = 1000;

/// Live sessions a store keeps before evicting the oldest.
pub const MAX_SESSIONS: usize = 1024;

/// Environment variable holding the log level filter.
pub const LOG_ENV_VAR: &str = "BATTLESHIP_LOG";

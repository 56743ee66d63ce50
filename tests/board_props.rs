use battleship::{
    random_fleet, resolve_air_strike, Board, CellOutcome, CellSet, Coordinate, GameError, Line,
    LineKind, Orientation, Ship, ShipKind, BOARD_SIZE, FLEET,
};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn random_board(seed: u64) -> (Board, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let board = random_fleet(&mut rng).unwrap();
    (board, rng)
}

fn orientation() -> impl Strategy<Value = Orientation> {
    prop_oneof![Just(Orientation::Horizontal), Just(Orientation::Vertical)]
}

fn ship_kind() -> impl Strategy<Value = ShipKind> {
    prop::sample::select(FLEET.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_fleet_is_complete_and_disjoint(seed in any::<u64>()) {
        let (board, _) = random_board(seed);
        prop_assert!(board.is_fleet_complete());
        let ships: Vec<&Ship> = board.ships().collect();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                prop_assert!(a.mask().is_disjoint(&b.mask()));
            }
        }
        let union = ships.iter().fold(CellSet::new(), |acc, s| acc | s.mask());
        prop_assert_eq!(board.occupancy(), union);
    }

    #[test]
    fn place_is_all_or_nothing(
        seed in any::<u64>(),
        kind in ship_kind(),
        row in 0..BOARD_SIZE + 3,
        col in 0..BOARD_SIZE + 3,
        orient in orientation(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        for &k in FLEET.iter().filter(|&&k| k != kind).take(rng.random_range(0..4)) {
            let ship = battleship::random_placement(&board, k, &mut rng).unwrap();
            board.place(ship).unwrap();
        }
        let before = board.clone();
        let origin = Coordinate::new(row, col);
        match Ship::new(kind, origin, orient) {
            Ok(ship) => {
                let fits = board.can_place(ship.cells());
                let mask = ship.mask();
                match board.place(ship) {
                    Ok(()) => {
                        prop_assert!(fits);
                        prop_assert_eq!(board.occupancy(), before.occupancy() | mask);
                    }
                    Err(_) => {
                        prop_assert!(!fits);
                        prop_assert_eq!(&board, &before);
                    }
                }
            }
            Err(_) => {
                let cells = battleship::compute_cells(origin, kind.size(), orient);
                prop_assert!(cells.iter().any(|c| !c.in_bounds()));
            }
        }
    }

    #[test]
    fn repeated_shot_changes_nothing(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
        let (mut board, _) = random_board(seed);
        let coord = Coordinate::new(row, col);
        board.receive_shot(coord).unwrap();
        let after_first = board.clone();
        prop_assert_eq!(board.receive_shot(coord).unwrap_err(), GameError::DuplicateShot(coord));
        prop_assert_eq!(&board, &after_first);
    }

    #[test]
    fn ship_sinks_exactly_on_last_cell(seed in any::<u64>()) {
        let (mut board, mut rng) = random_board(seed);
        let mut order: Vec<Coordinate> = Coordinate::all().collect();
        for i in (1..order.len()).rev() {
            order.swap(i, rng.random_range(0..=i));
        }
        for coord in order {
            let owner = board.ship_at(coord);
            let result = board.receive_shot(coord).unwrap();
            prop_assert_eq!(result.hit, owner.is_some());
            if let Some(kind) = owner {
                let ship = board.ship(kind).unwrap();
                prop_assert_eq!(result.sunk.is_some(), ship.is_sunk());
                if let Some(sunk) = result.sunk {
                    prop_assert_eq!(sunk.cells.as_slice(), ship.cells());
                }
            }
        }
        prop_assert!(board.all_sunk());
    }

    #[test]
    fn air_strike_fires_only_at_fresh_cells(
        seed in any::<u64>(),
        column in any::<bool>(),
        index in 0..BOARD_SIZE,
        pre_shot in prop::collection::vec(0..BOARD_SIZE, 0..BOARD_SIZE),
    ) {
        let (mut board, _) = random_board(seed);
        let kind = if column { LineKind::Column } else { LineKind::Row };
        let line = Line::new(kind, index).unwrap();
        let cells: Vec<Coordinate> = line.cells().collect();
        let mut already = CellSet::new();
        for i in pre_shot {
            if already.insert(cells[i]) {
                board.receive_shot(cells[i]).unwrap();
            }
        }

        let report = resolve_air_strike(&mut board, line).unwrap();
        prop_assert_eq!(report.cells.len(), BOARD_SIZE);
        prop_assert_eq!(report.shots_fired(), BOARD_SIZE - already.len());
        for cell in &report.cells {
            let skipped = cell.outcome == CellOutcome::AlreadyShot;
            prop_assert_eq!(skipped, already.contains(cell.coord));
            prop_assert!(board.is_shot(cell.coord));
        }
    }
}

use battleship::{
    compute_cells, validate_fleet, Board, CellSet, Coordinate, GameError, Orientation,
    PlacementError, Ship, ShipKind, ShipPlacement, ShotMark, FLEET, TOTAL_SHIP_CELLS,
};

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

/// Carrier, Battleship, Cruiser, Submarine, Destroyer on rows 0, 2, 4, 6, 8.
fn stacked_fleet() -> Vec<ShipPlacement> {
    FLEET
        .iter()
        .enumerate()
        .map(|(i, &kind)| ShipPlacement::new(kind, c(i * 2, 0), Orientation::Horizontal))
        .collect()
}

#[test]
fn compute_cells_grows_from_origin() {
    assert_eq!(
        compute_cells(c(3, 4), 3, Orientation::Horizontal),
        vec![c(3, 4), c(3, 5), c(3, 6)]
    );
    assert_eq!(
        compute_cells(c(3, 4), 3, Orientation::Vertical),
        vec![c(3, 4), c(4, 4), c(5, 4)]
    );
    let past_edge = compute_cells(c(0, 8), 3, Orientation::Horizontal);
    assert_eq!(past_edge[2], c(0, 10));
    assert!(!past_edge[2].in_bounds());
}

#[test]
fn destroyer_sinks_on_second_hit() {
    let mut board = Board::new();
    let ship = Ship::new(ShipKind::Destroyer, c(0, 0), Orientation::Horizontal).unwrap();
    assert_eq!(ship.cells(), &[c(0, 0), c(0, 1)]);
    board.place(ship).unwrap();

    let first = board.receive_shot(c(0, 0)).unwrap();
    assert!(first.hit);
    assert!(first.sunk.is_none());

    let second = board.receive_shot(c(0, 1)).unwrap();
    assert!(second.hit);
    let sunk = second.sunk.unwrap();
    assert_eq!(sunk.kind, ShipKind::Destroyer);
    assert_eq!(sunk.cells, vec![c(0, 0), c(0, 1)]);
}

#[test]
fn all_sunk_only_after_every_ship_cell() {
    let mut board = validate_fleet(&stacked_fleet()).unwrap();
    let targets: Vec<Coordinate> = board.occupancy().iter().collect();
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);

    for (i, &coord) in targets.iter().enumerate() {
        assert!(!board.all_sunk(), "fleet reported sunk after {i} shots");
        assert!(board.receive_shot(coord).unwrap().hit);
    }
    assert!(board.all_sunk());
    assert!(board.misses().is_empty());
    assert!(board.remaining_kinds().is_empty());
}

#[test]
fn sunk_reported_once_per_ship() {
    let mut board = validate_fleet(&stacked_fleet()).unwrap();
    let mut sunk = Vec::new();
    for coord in board.occupancy().iter().collect::<Vec<_>>() {
        if let Some(s) = board.receive_shot(coord).unwrap().sunk {
            sunk.push(s.kind);
        }
    }
    sunk.sort();
    let mut expected = FLEET.to_vec();
    expected.sort();
    assert_eq!(sunk, expected);
}

#[test]
fn partial_fleet_is_never_all_sunk() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Destroyer, c(5, 5), Orientation::Vertical).unwrap())
        .unwrap();
    board.receive_shot(c(5, 5)).unwrap();
    board.receive_shot(c(6, 5)).unwrap();
    assert!(board.ship(ShipKind::Destroyer).unwrap().is_sunk());
    assert!(!board.all_sunk());
}

#[test]
fn duplicate_shot_is_rejected_without_change() {
    let mut board = validate_fleet(&stacked_fleet()).unwrap();
    board.receive_shot(c(9, 9)).unwrap();
    let before = board.clone();
    assert_eq!(
        board.receive_shot(c(9, 9)).unwrap_err(),
        GameError::DuplicateShot(c(9, 9))
    );
    assert_eq!(board, before);
    assert_eq!(board.shot_at(c(9, 9)), ShotMark::Miss);
}

#[test]
fn shot_off_the_board_is_invalid() {
    let mut board = Board::new();
    assert_eq!(
        board.receive_shot(c(10, 0)).unwrap_err(),
        GameError::InvalidCoordinate { row: 10, col: 0 }
    );
    assert!(board.hits().is_empty() && board.misses().is_empty());
}

#[test]
fn placement_errors_leave_board_untouched() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Carrier, c(0, 0), Orientation::Horizontal).unwrap())
        .unwrap();
    let before = board.clone();

    let overlapping = Ship::new(ShipKind::Cruiser, c(0, 2), Orientation::Vertical).unwrap();
    assert_eq!(
        board.place(overlapping).unwrap_err(),
        PlacementError::Overlap {
            kind: ShipKind::Cruiser
        }
    );
    let duplicate = Ship::new(ShipKind::Carrier, c(5, 0), Orientation::Horizontal).unwrap();
    assert_eq!(
        board.place(duplicate).unwrap_err(),
        PlacementError::DuplicateShip(ShipKind::Carrier)
    );
    assert_eq!(
        Ship::new(ShipKind::Battleship, c(0, 7), Orientation::Horizontal).unwrap_err(),
        PlacementError::OutOfBounds {
            kind: ShipKind::Battleship,
            origin: c(0, 7)
        }
    );
    assert_eq!(board, before);
}

#[test]
fn validate_fleet_occupancy_is_union_of_ships() {
    let board = validate_fleet(&stacked_fleet()).unwrap();
    let union = board
        .ships()
        .fold(CellSet::new(), |acc, ship| acc | ship.mask());
    assert_eq!(board.occupancy(), union);
    assert_eq!(board.occupancy().len(), TOTAL_SHIP_CELLS);
    assert!(board.is_fleet_complete());
    assert_eq!(board.grid()[2][3], Some(ShipKind::Battleship));
    assert_eq!(board.grid()[3][3], None);
}

#[test]
fn validate_fleet_rejects_bad_fleets() {
    let mut short = stacked_fleet();
    short.pop();
    assert_eq!(
        validate_fleet(&short).unwrap_err(),
        PlacementError::FleetComposition {
            expected: 5,
            found: 4
        }
    );

    let mut doubled = stacked_fleet();
    doubled[4] = ShipPlacement::new(ShipKind::Cruiser, c(9, 0), Orientation::Horizontal);
    assert_eq!(
        validate_fleet(&doubled).unwrap_err(),
        PlacementError::DuplicateShip(ShipKind::Cruiser)
    );

    let mut crossing = stacked_fleet();
    crossing[4] = ShipPlacement::new(ShipKind::Destroyer, c(1, 1), Orientation::Vertical);
    assert_eq!(
        validate_fleet(&crossing).unwrap_err(),
        PlacementError::Overlap {
            kind: ShipKind::Destroyer
        }
    );
}

#[test]
fn ship_names_parse_case_insensitively() {
    assert_eq!("submarine".parse::<ShipKind>().unwrap(), ShipKind::Submarine);
    assert_eq!(" CARRIER ".parse::<ShipKind>().unwrap(), ShipKind::Carrier);
    assert_eq!(
        "Frigate".parse::<ShipKind>().unwrap_err(),
        PlacementError::UnknownShip("Frigate".to_string())
    );
}

#[test]
fn shot_history_hides_unsunk_ships() {
    let mut board = validate_fleet(&stacked_fleet()).unwrap();
    board.receive_shot(c(8, 0)).unwrap();
    board.receive_shot(c(8, 1)).unwrap();
    board.receive_shot(c(0, 0)).unwrap();
    board.receive_shot(c(9, 9)).unwrap();

    let history = board.shot_history();
    assert_eq!(history.hits.len(), 3);
    assert_eq!(history.misses.len(), 1);
    assert_eq!(history.sunk, [c(8, 0), c(8, 1)].into_iter().collect::<CellSet>());
    assert_eq!(history.open_hits(), [c(0, 0)].into_iter().collect::<CellSet>());
    assert!(!history.remaining.contains(&ShipKind::Destroyer));
    assert_eq!(history.unshot().len(), 96);
}

#[test]
fn ship_statuses_track_hits_per_ship() {
    let mut board = Board::new();
    board
        .place(Ship::new(ShipKind::Cruiser, c(1, 1), Orientation::Vertical).unwrap())
        .unwrap();
    board.receive_shot(c(2, 1)).unwrap();

    let statuses = board.ship_statuses();
    assert_eq!(statuses.len(), FLEET.len());
    let cruiser = statuses
        .iter()
        .find(|s| s.kind == ShipKind::Cruiser)
        .unwrap();
    assert!(cruiser.placed && !cruiser.sunk);
    assert_eq!(cruiser.hits, 1);
    assert!(statuses
        .iter()
        .filter(|s| s.kind != ShipKind::Cruiser)
        .all(|s| !s.placed && s.hits == 0));
}

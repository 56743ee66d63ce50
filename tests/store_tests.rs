use battleship::{
    Difficulty, GameApi, GameError, GameStatus, LineKind, Orientation, Request, Response,
    SessionStore, ShipSpec, Skeleton,
};

fn spec(name: &str, row: usize, col: usize) -> ShipSpec {
    ShipSpec {
        name: name.to_string(),
        row,
        col,
        orientation: Orientation::Horizontal,
    }
}

fn fleet() -> Vec<ShipSpec> {
    vec![
        spec("Carrier", 0, 0),
        spec("battleship", 2, 0),
        spec("Cruiser", 4, 0),
        spec("SUBMARINE", 6, 0),
        spec("Destroyer", 8, 0),
    ]
}

#[tokio::test]
async fn full_round_through_the_store() {
    let store = SessionStore::with_seed(42);
    let id = store.new_game(Difficulty::Medium, None).await.unwrap();

    let state = store.place_ships(&id, fleet()).await.unwrap();
    assert_eq!(state.status, GameStatus::InProgress);
    assert_eq!(state.session_id, id);

    let shot = store.fire_shot(&id, 9, 9).await.unwrap();
    assert!(shot.ai_shot.is_some());
    assert!(shot.ai_shot.as_ref().unwrap().game_state.is_none());
    assert!(!shot.game_over);
    let state = shot.game_state.unwrap();
    assert_eq!(state.player_hits, usize::from(shot.hit));

    let strike = store.fire_air_strike(&id, LineKind::Column, 3).await.unwrap();
    assert_eq!(strike.results.len(), 10);
    assert!(!strike.air_strike_available);
    assert_eq!(
        store
            .fire_air_strike(&id, LineKind::Row, 0)
            .await
            .unwrap_err(),
        GameError::AirStrikeUnavailable
    );

    store.end_game(&id).await.unwrap();
    assert!(matches!(
        store.get_state(&id).await.unwrap_err(),
        GameError::SessionNotFound(_)
    ));
}

#[tokio::test]
async fn sessions_are_independent() {
    let store = SessionStore::with_seed(7);
    let a = store.new_game(Difficulty::Easy, None).await.unwrap();
    let b = store.new_game(Difficulty::Hard, None).await.unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len().await, 2);

    store.place_ships(&a, fleet()).await.unwrap();
    store.fire_shot(&a, 5, 5).await.unwrap();

    let state_b = store.get_state(&b).await.unwrap();
    assert_eq!(state_b.status, GameStatus::Setup);
    assert_eq!(state_b.difficulty, Difficulty::Hard);
    assert_eq!(store.fire_shot(&b, 5, 5).await.unwrap_err(), GameError::NotReady);
}

#[tokio::test]
async fn new_game_can_replace_an_old_session() {
    let store = SessionStore::new();
    let old = store.new_game(Difficulty::Medium, None).await.unwrap();
    let new = store
        .new_game(Difficulty::Medium, Some(old.clone()))
        .await
        .unwrap();
    assert_eq!(store.len().await, 1);
    assert!(store.get_state(&new).await.is_ok());
    assert!(store.get_state(&old).await.is_err());
}

#[tokio::test]
async fn abandoned_sessions_are_evicted_oldest_first() {
    let store = SessionStore::with_seed(4).with_capacity(2);
    let first = store.new_game(Difficulty::Easy, None).await.unwrap();
    let second = store.new_game(Difficulty::Easy, None).await.unwrap();
    let third = store.new_game(Difficulty::Easy, None).await.unwrap();

    assert_eq!(store.len().await, 2);
    assert!(matches!(
        store.get_state(&first).await.unwrap_err(),
        GameError::SessionNotFound(_)
    ));
    assert!(store.get_state(&second).await.is_ok());
    assert!(store.get_state(&third).await.is_ok());

    for _ in 0..5 {
        store.new_game(Difficulty::Easy, None).await.unwrap();
    }
    assert_eq!(store.len().await, 2);
}

#[tokio::test]
async fn bad_arguments_are_rejected() {
    let store = SessionStore::with_seed(3);
    let id = store.new_game(Difficulty::Medium, None).await.unwrap();

    let mut unknown = fleet();
    unknown[0].name = "Frigate".to_string();
    assert!(matches!(
        store.place_ships(&id, unknown).await.unwrap_err(),
        GameError::Placement(_)
    ));
    assert_eq!(
        store.get_state(&id).await.unwrap().status,
        GameStatus::Setup
    );

    store.place_ships(&id, fleet()).await.unwrap();
    assert_eq!(
        store.fire_shot(&id, 10, 2).await.unwrap_err(),
        GameError::InvalidCoordinate { row: 10, col: 2 }
    );
    assert_eq!(
        store
            .fire_air_strike(&id, LineKind::Row, 12)
            .await
            .unwrap_err(),
        GameError::InvalidTarget {
            kind: LineKind::Row,
            index: 12
        }
    );
    assert!(store.get_state(&id).await.unwrap().air_strike_available.player);
    assert!(matches!(
        store.fire_shot("missing", 0, 0).await.unwrap_err(),
        GameError::SessionNotFound(_)
    ));
}

#[tokio::test]
async fn skeleton_speaks_json() {
    let skeleton = Skeleton::new(SessionStore::with_seed(1));
    let created = skeleton
        .handle_line(r#"{"type":"new_game","difficulty":"hard"}"#)
        .await;
    let Response::GameCreated { session_id } = created else {
        panic!("expected game_created");
    };

    let ships = serde_json::to_value(fleet()).unwrap();
    let place = serde_json::json!({
        "type": "place_ships",
        "session_id": session_id,
        "ships": ships,
    });
    let reply = skeleton.handle_line(&place.to_string()).await;
    assert!(matches!(reply, Response::State { .. }), "{reply:?}");

    let reply = skeleton
        .handle(Request::FireShot {
            session_id: session_id.clone(),
            row: 0,
            col: 0,
        })
        .await;
    let Response::Shot(shot) = reply else {
        panic!("expected a shot reply");
    };
    assert_eq!((shot.row, shot.col), (0, 0));
    assert!(shot.ai_shot.is_some());

    let again = skeleton
        .handle(Request::FireShot {
            session_id,
            row: 0,
            col: 0,
        })
        .await;
    assert_eq!(
        serde_json::to_value(&again).unwrap()["kind"],
        "duplicate_shot"
    );

    let garbage = skeleton.handle_line("{not json").await;
    assert!(matches!(garbage, Response::Error { ref kind, .. } if kind == "malformed_request"));
}

#[tokio::test]
async fn skeleton_run_answers_each_line() {
    let skeleton = Skeleton::new(SessionStore::with_seed(2));
    let input = b"{\"type\":\"new_game\"}\n\n{\"type\":\"get_state\",\"session_id\":\"nope\"}\n";
    let mut output = Vec::new();
    skeleton.run(&input[..], &mut output).await.unwrap();

    let replies: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["type"], "game_created");
    assert_eq!(replies[1]["type"], "error");
    assert_eq!(replies[1]["kind"], "session_not_found");
}

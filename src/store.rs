//! In-memory session registry implementing [`GameApi`].
//!
//! Sessions are independent; each sits behind its own mutex so requests
//! against one session are applied one at a time while others proceed.
//! The store holds at most `capacity` sessions; starting one more evicts
//! the oldest.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::{Mutex, RwLock};

use crate::ai::Difficulty;
use crate::common::GameError;
use crate::config::MAX_SESSIONS;
use crate::coord::{Coordinate, Line, LineKind};
use crate::game::{GameSession, GameStateView};
use crate::placement::ShipPlacement;
use crate::protocol::{AirStrikeResponse, GameApi, SessionId, ShipSpec, ShotResponse};

type SharedSession = Arc<Mutex<GameSession>>;

struct Entry {
    /// Creation order, used to pick the eviction victim.
    serial: u64,
    session: SharedSession,
}

pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    /// Base seed for reproducible runs; each new session takes the next offset.
    seed: Option<u64>,
    capacity: usize,
    created: AtomicU64,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self {
            sessions: RwLock::default(),
            seed: None,
            capacity: MAX_SESSIONS,
            created: AtomicU64::new(0),
        }
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose sessions draw from deterministic RNGs derived from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Cap the number of live sessions (at least one).
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn next_rng(&self) -> (u64, SmallRng) {
        let n = self.created.fetch_add(1, Ordering::Relaxed);
        let rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(n)),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        (n, rng)
    }

    async fn session(&self, session_id: &str) -> Result<SharedSession, GameError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|entry| Arc::clone(&entry.session))
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))
    }
}

#[async_trait::async_trait]
impl GameApi for SessionStore {
    async fn new_game(
        &self,
        difficulty: Difficulty,
        replaces: Option<SessionId>,
    ) -> Result<SessionId, GameError> {
        let id = uuid::Uuid::new_v4().to_string();
        let (serial, rng) = self.next_rng();
        let session = GameSession::new(id.clone(), difficulty, rng)?;
        let mut sessions = self.sessions.write().await;
        if let Some(old) = replaces {
            if sessions.remove(&old).is_some() {
                debug!("session {old}: replaced by {id}");
            }
        }
        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.serial)
                .map(|(key, _)| key.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            warn!("session {oldest}: evicted, store holds {} sessions", self.capacity);
        }
        sessions.insert(
            id.clone(),
            Entry {
                serial,
                session: Arc::new(Mutex::new(session)),
            },
        );
        Ok(id)
    }

    async fn place_ships(&self, session_id: &str, ships: Vec<ShipSpec>) -> Result<GameStateView, GameError> {
        let session = self.session(session_id).await?;
        let placements = ships
            .iter()
            .map(ShipPlacement::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let mut session = session.lock().await;
        session.place_fleet(&placements)?;
        session.start_play()?;
        Ok(session.state())
    }

    async fn fire_shot(&self, session_id: &str, row: usize, col: usize) -> Result<ShotResponse, GameError> {
        let session = self.session(session_id).await?;
        let coord = Coordinate::try_new(row, col)?;
        let mut session = session.lock().await;
        let turn = session.fire_shot(coord)?;
        Ok(ShotResponse::from_turn(&turn, session.state()))
    }

    async fn fire_air_strike(
        &self,
        session_id: &str,
        target_type: LineKind,
        index: usize,
    ) -> Result<AirStrikeResponse, GameError> {
        let session = self.session(session_id).await?;
        let line = Line::new(target_type, index)?;
        let mut session = session.lock().await;
        let turn = session.fire_air_strike(line)?;
        Ok(AirStrikeResponse::from_turn(&turn, session.state()))
    }

    async fn get_state(&self, session_id: &str) -> Result<GameStateView, GameError> {
        let session = self.session(session_id).await?;
        let state = session.lock().await.state();
        Ok(state)
    }

    async fn end_game(&self, session_id: &str) -> Result<(), GameError> {
        self.sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| GameError::SessionNotFound(session_id.to_string()))?;
        info!("session {session_id}: ended");
        Ok(())
    }
}

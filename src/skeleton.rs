//! Server-side skeleton: decodes requests, drives a [`GameApi`] and encodes
//! the replies. The wire format is one JSON object per line.

use log::{debug, error, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::protocol::{GameApi, Request, Response};

pub struct Skeleton<A: GameApi> {
    api: A,
}

impl<A: GameApi> Skeleton<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Apply one request. Failures come back as [`Response::Error`].
    pub async fn handle(&self, request: Request) -> Response {
        debug!("request: {request:?}");
        let result = match request {
            Request::NewGame { difficulty, replaces } => self
                .api
                .new_game(difficulty, replaces)
                .await
                .map(|session_id| Response::GameCreated { session_id }),
            Request::PlaceShips { session_id, ships } => self
                .api
                .place_ships(&session_id, ships)
                .await
                .map(|game_state| Response::State { game_state }),
            Request::FireShot { session_id, row, col } => self
                .api
                .fire_shot(&session_id, row, col)
                .await
                .map(Response::Shot),
            Request::FireAirStrike {
                session_id,
                target_type,
                index,
            } => self
                .api
                .fire_air_strike(&session_id, target_type, index)
                .await
                .map(Response::AirStrike),
            Request::GetState { session_id } => self
                .api
                .get_state(&session_id)
                .await
                .map(|game_state| Response::State { game_state }),
            Request::EndGame { session_id } => self
                .api
                .end_game(&session_id)
                .await
                .map(|()| Response::GameEnded { session_id }),
        };
        result.unwrap_or_else(|err| {
            if err.is_fatal() {
                error!("{err}");
            } else {
                warn!("request rejected: {err}");
            }
            Response::from(&err)
        })
    }

    /// Decode and apply one line of input.
    pub async fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request).await,
            Err(err) => {
                warn!("malformed request: {err}");
                Response::Error {
                    kind: "malformed_request".to_string(),
                    message: err.to_string(),
                }
            }
        }
    }

    /// Serve requests until `reader` reaches end of input. Blank lines are
    /// skipped; every other line gets exactly one reply line.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let reply = self.handle_line(line).await;
            let mut encoded = serde_json::to_string(&reply)?;
            encoded.push('\n');
            writer.write_all(encoded.as_bytes()).await?;
            writer.flush().await?;
        }
        Ok(())
    }
}

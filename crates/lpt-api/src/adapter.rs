use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use lpt_core::{CommandExecutor, Dispatcher, PlayerStore, TrackError};
use lpt_model::{CommandId, Invocation, Player, PlayerIdentity, PlayerPage, PlayerQuery};

use crate::{
    board::{CommandBoard, CommandReply},
    error::ApiError,
    handler::{ApiHandler, StatsView},
};

/// Bridges the command executor to [`ApiHandler`].
///
/// Commands run through a [`Dispatcher`] whose responder is the shared
/// [`CommandBoard`].
pub struct CoreAdapter {
    dispatcher: Dispatcher,
    board: CommandBoard,
}

impl CoreAdapter {
    pub fn new(executor: Arc<CommandExecutor>, board: CommandBoard) -> Self {
        let dispatcher = Dispatcher::new(executor, Arc::new(board.clone()));
        Self { dispatcher, board }
    }
}

#[async_trait]
impl ApiHandler for CoreAdapter {
    async fn submit_command(&self, invocation: Invocation) -> Result<Option<CommandId>, ApiError> {
        let Some(dispatched) = self.dispatcher.dispatch(&invocation)? else {
            debug!(command = %invocation.name, "command dropped");
            return Ok(None);
        };
        self.board.register(&dispatched.id, dispatched.kind);
        // The handle is detached; the board collects the outcome.
        Ok(Some(dispatched.id))
    }

    async fn command_status(&self, id: &CommandId) -> Result<Option<CommandReply>, ApiError> {
        Ok(self.board.get(id))
    }

    async fn stats(&self) -> Result<StatsView, ApiError> {
        let executor = self.dispatcher.executor();
        let snap = executor.stats().snapshot();
        Ok(StatsView {
            total: snap.total,
            active: snap.active,
            average_ms: snap.average.as_millis() as u64,
            workers: executor.pool().capacity(),
            in_use: executor.pool().in_use(),
        })
    }

    async fn query_players(&self, query: PlayerQuery) -> Result<PlayerPage<Player>, ApiError> {
        let store = self.dispatcher.executor().service().store();
        store
            .page(&query)
            .await
            .map_err(|e| ApiError::Track(TrackError::Store(e)))
    }

    async fn find_player(&self, identity: PlayerIdentity) -> Result<Option<Player>, ApiError> {
        let service = self.dispatcher.executor().service();
        Ok(service.find_player(&identity).await?)
    }
}

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use lpt_model::{CommandId, Invocation, Player, PlayerIdentity, PlayerPage, PlayerQuery};

use crate::{board::CommandReply, error::ApiError};

/// Executor counters plus pool occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsView {
    pub total: u64,
    pub active: u64,
    pub average_ms: u64,
    pub workers: usize,
    pub in_use: usize,
}

/// Command front-end backend.
///
/// [`CoreAdapter`](crate::CoreAdapter) is the stock implementation; wrap it to
/// add auth or rate limiting.
#[async_trait]
pub trait ApiHandler: Send + Sync + 'static {
    /// Accept a command. `None` means the name was not recognized and the
    /// command was dropped.
    async fn submit_command(&self, invocation: Invocation) -> Result<Option<CommandId>, ApiError>;

    async fn command_status(&self, id: &CommandId) -> Result<Option<CommandReply>, ApiError>;

    async fn stats(&self) -> Result<StatsView, ApiError>;

    async fn query_players(&self, query: PlayerQuery) -> Result<PlayerPage<Player>, ApiError>;

    async fn find_player(&self, identity: PlayerIdentity) -> Result<Option<Player>, ApiError>;
}

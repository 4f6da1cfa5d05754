use async_trait::async_trait;
use lpt_model::{PlayerIdentity, Puuid, RankedStats, Server};

use crate::errors::LookupError;

/// Account, summoner and ladder data resolved for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProfile {
    pub puuid: Puuid,
    pub summoner_id: String,
    pub summoner_level: u32,
    pub profile_icon_id: u32,
    pub ranked: RankedStats,
}

/// Source of current ranked stats.
///
/// Implemented by [`crate::RiotClient`]; replaced by fakes in tests.
#[async_trait]
pub trait RankLookup: Send + Sync + 'static {
    /// Resolve a Riot ID on a server into its current profile.
    ///
    /// Fails with [`LookupError::NotFound`] when no account matches.
    async fn lookup(&self, identity: &PlayerIdentity) -> Result<RankedProfile, LookupError>;

    /// Re-read the profile of an already known account.
    async fn refresh(&self, puuid: &str, server: Server) -> Result<RankedProfile, LookupError>;
}

//! Player tracking operations on top of a store and a rank lookup.

use std::{sync::Arc, time::Duration, time::SystemTime};

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use lpt_model::{Player, PlayerIdentity};
use lpt_riot::{LookupError, RankLookup, RankedProfile};

use crate::{
    directory::PlayerStore,
    error::{RefreshFailure, TrackError},
};

#[derive(Debug, Clone)]
pub struct TrackingConfig {
    /// Pause between two consecutive players during a refresh pass.
    pub refresh_pacing: Duration,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            refresh_pacing: Duration::from_secs(1),
        }
    }
}

/// Outcome of a refresh pass that had no failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshSummary {
    pub total: usize,
    pub updated: usize,
    /// The pass stopped early because its token was cancelled.
    pub interrupted: bool,
}

pub struct TrackingService {
    store: Arc<dyn PlayerStore>,
    lookup: Arc<dyn RankLookup>,
    cfg: TrackingConfig,
}

impl TrackingService {
    pub fn new(store: Arc<dyn PlayerStore>, lookup: Arc<dyn RankLookup>) -> Self {
        Self::with_config(store, lookup, TrackingConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn PlayerStore>,
        lookup: Arc<dyn RankLookup>,
        cfg: TrackingConfig,
    ) -> Self {
        Self { store, lookup, cfg }
    }

    pub fn store(&self) -> &Arc<dyn PlayerStore> {
        &self.store
    }

    /// Start tracking `identity`.
    ///
    /// The existence check is advisory; the store's uniqueness constraint
    /// decides concurrent adds. A cancelled `cancel` token stops the call
    /// before anything is written.
    #[instrument(skip(self, cancel), fields(player = %identity))]
    pub async fn add_player(
        &self,
        identity: PlayerIdentity,
        cancel: &CancellationToken,
    ) -> Result<Player, TrackError> {
        if self
            .store
            .exists(&identity)
            .await
            .map_err(TrackError::Store)?
        {
            debug!("player already tracked");
            return Err(TrackError::AlreadyTracked(identity));
        }

        let profile = match self.lookup.lookup(&identity).await {
            Ok(profile) => profile,
            Err(e) if e.is_not_found() => {
                return Err(TrackError::NotFound {
                    identity,
                    source: e,
                });
            }
            Err(e) => return Err(TrackError::Lookup(e)),
        };

        if cancel.is_cancelled() {
            warn!("deadline passed during lookup; not saving player");
            return Err(TrackError::Cancelled(identity));
        }

        match self.store.create(new_player(&identity, profile)).await {
            Ok(player) => {
                info!(tier = %player.ranked.tier, "player tracked");
                Ok(player)
            }
            Err(e) if e.is_duplicate() => Err(TrackError::AlreadyTracked(identity)),
            Err(e) => Err(TrackError::Store(e)),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn list_players(&self) -> Result<Vec<Player>, TrackError> {
        self.store.find_all().await.map_err(TrackError::Store)
    }

    /// Directory lookup; never calls the provider.
    pub async fn find_player(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Option<Player>, TrackError> {
        self.store
            .find_by_identity(identity)
            .await
            .map_err(TrackError::Store)
    }

    /// Fetch fresh ranked data for one stored player and persist it.
    #[instrument(level = "debug", skip(self, player), fields(player = %player.identity()))]
    pub async fn refresh_player(&self, player: &Player) -> Result<Player, TrackError> {
        let profile = self
            .lookup
            .refresh(&player.puuid, player.server)
            .await
            .map_err(TrackError::Lookup)?;

        let mut next = player.clone();
        apply_profile(&mut next, profile);
        self.store.update(&next).await.map_err(TrackError::Store)
    }

    /// Refresh every tracked player one after another.
    ///
    /// Waits `refresh_pacing` between players. Failures are collected and
    /// reported together once the pass is over; successes stay persisted.
    #[instrument(skip_all)]
    pub async fn refresh_all(
        &self,
        cancel: &CancellationToken,
    ) -> Result<RefreshSummary, TrackError> {
        let players = self.list_players().await?;
        let mut summary = RefreshSummary {
            total: players.len(),
            ..RefreshSummary::default()
        };
        let mut failures = Vec::new();

        for (idx, player) in players.iter().enumerate() {
            if idx > 0 {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        summary.interrupted = true;
                        break;
                    }
                    _ = tokio::time::sleep(self.cfg.refresh_pacing) => {}
                }
            } else if cancel.is_cancelled() {
                summary.interrupted = true;
                break;
            }

            match self.refresh_player(player).await {
                Ok(_) => summary.updated += 1,
                Err(e) => {
                    warn!(player = %player.identity(), error = %e, "player refresh failed");
                    failures.push(RefreshFailure {
                        identity: player.identity(),
                        reason: reason(&e),
                    });
                }
            }
        }

        info!(
            total = summary.total,
            updated = summary.updated,
            failed = failures.len(),
            interrupted = summary.interrupted,
            "refresh pass finished"
        );

        if failures.is_empty() {
            Ok(summary)
        } else {
            Err(TrackError::Refresh {
                updated: summary.updated,
                failures,
            })
        }
    }
}

fn reason(err: &TrackError) -> String {
    match err {
        TrackError::Lookup(LookupError::RateLimited { .. }) => "rate limited".to_string(),
        other => other.to_string(),
    }
}

fn new_player(identity: &PlayerIdentity, profile: RankedProfile) -> Player {
    let now = SystemTime::now();
    let mut player = Player {
        id: None,
        puuid: String::new(),
        game_name: identity.game_name.clone(),
        tag_line: identity.tag_line.clone(),
        server: identity.server,
        summoner_id: String::new(),
        summoner_level: 0,
        profile_icon_id: 0,
        ranked: Default::default(),
        created_at: now,
        updated_at: now,
    };
    apply_profile(&mut player, profile);
    player
}

fn apply_profile(player: &mut Player, profile: RankedProfile) {
    player.puuid = profile.puuid;
    player.summoner_id = profile.summoner_id;
    player.summoner_level = profile.summoner_level;
    player.profile_icon_id = profile.profile_icon_id;
    player.ranked = profile.ranked;
}

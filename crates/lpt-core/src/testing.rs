use std::{
    collections::HashSet,
    future::Future,
    pin::Pin,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, SystemTime},
};

use async_trait::async_trait;

use lpt_model::{
    Player, PlayerId, PlayerIdentity, PlayerPage, PlayerQuery, RankedStats, Server,
};
use lpt_riot::{LookupError, RankLookup, RankedProfile};

use crate::{
    directory::{InMemoryStore, PlayerStore},
    error::StoreError,
};

pub fn identity(name: &str, tag: &str, server: Server) -> PlayerIdentity {
    PlayerIdentity::new(name, tag, server)
}

fn puuid(name: &str, tag: &str) -> String {
    format!("puuid-{name}-{tag}")
}

fn ranked(tier: &str) -> RankedStats {
    RankedStats {
        tier: tier.to_string(),
        rank: "II".to_string(),
        league_points: 50,
        wins: 10,
        losses: 10,
    }
}

pub fn player(name: &str, tag: &str, server: Server) -> Player {
    let now = SystemTime::now();
    Player {
        id: None,
        puuid: puuid(name, tag),
        game_name: name.to_string(),
        tag_line: tag.to_string(),
        server,
        summoner_id: format!("summoner-{name}"),
        summoner_level: 100,
        profile_icon_id: 1,
        ranked: ranked("GOLD"),
        created_at: now,
        updated_at: now,
    }
}

pub type HookFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

type Hook = Arc<dyn Fn() -> HookFuture + Send + Sync>;

/// Scriptable [`RankLookup`]: lookups answer GOLD, refreshes answer PLATINUM.
#[derive(Default)]
pub struct FakeLookup {
    accounts: HashSet<(String, String)>,
    failing_refresh: HashSet<String>,
    rate_limited: bool,
    delay: Option<Duration>,
    hook: Mutex<Option<Hook>>,
    lookups: AtomicUsize,
    refreshes: AtomicUsize,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, name: &str, tag: &str) -> Self {
        self.accounts.insert((name.to_string(), tag.to_string()));
        self
    }

    pub fn failing_refresh(mut self, puuid: &str) -> Self {
        self.failing_refresh.insert(puuid.to_string());
        self
    }

    pub fn rate_limited(mut self) -> Self {
        self.rate_limited = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Run `hook` inside every lookup, after the provider "answered".
    pub fn on_lookup<F>(&self, hook: F)
    where
        F: Fn() -> HookFuture + Send + Sync + 'static,
    {
        *self.hook.lock().unwrap() = Some(Arc::new(hook));
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RankLookup for FakeLookup {
    async fn lookup(&self, identity: &PlayerIdentity) -> Result<RankedProfile, LookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let hook = self.hook.lock().unwrap().clone();
        if let Some(hook) = hook {
            hook().await;
        }

        if self.rate_limited {
            return Err(LookupError::RateLimited {
                retry_after_secs: Some(1),
            });
        }
        let key = (identity.game_name.clone(), identity.tag_line.clone());
        if !self.accounts.contains(&key) {
            return Err(LookupError::NotFound {
                riot_id: identity.riot_id(),
            });
        }
        Ok(RankedProfile {
            puuid: puuid(&identity.game_name, &identity.tag_line),
            summoner_id: format!("summoner-{}", identity.game_name),
            summoner_level: 100,
            profile_icon_id: 1,
            ranked: ranked("GOLD"),
        })
    }

    async fn refresh(&self, puuid: &str, _server: Server) -> Result<RankedProfile, LookupError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        if self.failing_refresh.contains(puuid) {
            return Err(LookupError::Status {
                code: 500,
                body: "boom".to_string(),
            });
        }
        Ok(RankedProfile {
            puuid: puuid.to_string(),
            summoner_id: "summoner".to_string(),
            summoner_level: 101,
            profile_icon_id: 2,
            ranked: ranked("PLATINUM"),
        })
    }
}

/// [`InMemoryStore`] whose `find_all` takes `delay` of (tokio) time.
#[derive(Clone)]
pub struct SlowStore {
    pub inner: InMemoryStore,
    pub delay: Duration,
}

#[async_trait]
impl PlayerStore for SlowStore {
    async fn create(&self, player: Player) -> Result<Player, StoreError> {
        self.inner.create(player).await
    }

    async fn find_by_identity(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Option<Player>, StoreError> {
        self.inner.find_by_identity(identity).await
    }

    async fn find_by_puuid(&self, puuid: &str) -> Result<Option<Player>, StoreError> {
        self.inner.find_by_puuid(puuid).await
    }

    async fn update(&self, player: &Player) -> Result<Player, StoreError> {
        self.inner.update(player).await
    }

    async fn find_all(&self) -> Result<Vec<Player>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.find_all().await
    }

    async fn find_by_server(&self, server: Server) -> Result<Vec<Player>, StoreError> {
        self.inner.find_by_server(server).await
    }

    async fn page(&self, query: &PlayerQuery) -> Result<PlayerPage<Player>, StoreError> {
        self.inner.page(query).await
    }

    async fn delete(&self, id: &PlayerId) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }

    async fn delete_by_identity(&self, identity: &PlayerIdentity) -> Result<bool, StoreError> {
        self.inner.delete_by_identity(identity).await
    }
}

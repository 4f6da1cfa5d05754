use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, RwLock},
    time::SystemTime,
};

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use lpt_model::{Player, PlayerId, PlayerIdentity, PlayerPage, PlayerQuery, Server};

use crate::{directory::PlayerStore, error::StoreError};

/// In-memory player directory.
///
/// Records are keyed by an insertion sequence so listings keep a stable order.
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

#[derive(Default)]
struct StoreInner {
    next_seq: u64,
    /// Records indexed by insertion sequence.
    players: BTreeMap<u64, Player>,
    by_id: HashMap<PlayerId, u64>,
    /// Index: identity -> sequence (unique).
    by_identity: HashMap<PlayerIdentity, u64>,
    /// Index: puuid -> sequence (unique).
    by_puuid: HashMap<String, u64>,
}

impl StoreInner {
    fn unlink(&mut self, seq: u64) -> Option<Player> {
        let player = self.players.remove(&seq)?;
        if let Some(id) = &player.id {
            self.by_id.remove(id);
        }
        self.by_identity.remove(&player.identity());
        self.by_puuid.remove(&player.puuid);
        Some(player)
    }

    fn link(&mut self, seq: u64, player: Player) {
        if let Some(id) = &player.id {
            self.by_id.insert(id.clone(), seq);
        }
        self.by_identity.insert(player.identity(), seq);
        self.by_puuid.insert(player.puuid.clone(), seq);
        self.players.insert(seq, player);
    }

    /// Uniqueness check for `player` ignoring the record at `own`.
    fn conflict(&self, player: &Player, own: Option<u64>) -> Option<StoreError> {
        let identity = player.identity();
        if let Some(seq) = self.by_identity.get(&identity)
            && Some(*seq) != own
        {
            return Some(StoreError::DuplicateIdentity(identity));
        }
        if let Some(seq) = self.by_puuid.get(&player.puuid)
            && Some(*seq) != own
        {
            return Some(StoreError::DuplicatePuuid(player.puuid.clone()));
        }
        None
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerStore for InMemoryStore {
    async fn create(&self, mut player: Player) -> Result<Player, StoreError> {
        let mut inner = self.inner.write().unwrap();

        if let Some(err) = inner.conflict(&player, None) {
            return Err(err);
        }

        let now = SystemTime::now();
        player.id = Some(PlayerId::from(Uuid::new_v4().to_string()));
        player.created_at = now;
        player.updated_at = now;

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.link(seq, player.clone());

        debug!(player = %player.identity(), "player stored");
        Ok(player)
    }

    async fn find_by_identity(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Option<Player>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .by_identity
            .get(identity)
            .and_then(|seq| inner.players.get(seq))
            .cloned())
    }

    async fn find_by_puuid(&self, puuid: &str) -> Result<Option<Player>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .by_puuid
            .get(puuid)
            .and_then(|seq| inner.players.get(seq))
            .cloned())
    }

    async fn update(&self, player: &Player) -> Result<Player, StoreError> {
        let id = player.id.as_ref().ok_or(StoreError::MissingId)?;
        let mut inner = self.inner.write().unwrap();

        let seq = *inner
            .by_id
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if let Some(err) = inner.conflict(player, Some(seq)) {
            return Err(err);
        }

        let created_at = inner
            .unlink(seq)
            .map(|old| old.created_at)
            .unwrap_or(player.created_at);
        let mut updated = player.clone();
        updated.created_at = created_at;
        updated.updated_at = SystemTime::now();
        inner.link(seq, updated.clone());

        Ok(updated)
    }

    async fn find_all(&self) -> Result<Vec<Player>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner.players.values().cloned().collect())
    }

    async fn find_by_server(&self, server: Server) -> Result<Vec<Player>, StoreError> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .players
            .values()
            .filter(|p| p.server == server)
            .cloned()
            .collect())
    }

    async fn page(&self, query: &PlayerQuery) -> Result<PlayerPage<Player>, StoreError> {
        let inner = self.inner.read().unwrap();

        // Insertion order is creation order, so reversing gives newest first.
        let filtered: Vec<&Player> = inner
            .players
            .values()
            .rev()
            .filter(|p| query.server.is_none_or(|s| p.server == s))
            .collect();
        let total = filtered.len();

        let items = filtered
            .into_iter()
            .skip(query.offset())
            .take(query.limit)
            .cloned()
            .collect();

        Ok(PlayerPage { items, total })
    }

    async fn delete(&self, id: &PlayerId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let Some(seq) = inner.by_id.get(id).copied() else {
            return Ok(false);
        };
        Ok(inner.unlink(seq).is_some())
    }

    async fn delete_by_identity(&self, identity: &PlayerIdentity) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().unwrap();
        let Some(seq) = inner.by_identity.get(identity).copied() else {
            return Ok(false);
        };
        Ok(inner.unlink(seq).is_some())
    }
}

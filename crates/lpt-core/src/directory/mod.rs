//! Persistent record of tracked players.

mod memory;
pub use memory::InMemoryStore;

use async_trait::async_trait;

use lpt_model::{Player, PlayerId, PlayerIdentity, PlayerPage, PlayerQuery, Server};

use crate::error::StoreError;

/// Storage backend for tracked players.
///
/// Implementations must reject a second record with the same identity or the
/// same puuid atomically inside [`PlayerStore::create`]; callers only perform
/// an advisory existence check before it.
#[async_trait]
pub trait PlayerStore: Send + Sync + 'static {
    /// Insert a new record, assigning its id and timestamps.
    async fn create(&self, player: Player) -> Result<Player, StoreError>;

    async fn find_by_identity(
        &self,
        identity: &PlayerIdentity,
    ) -> Result<Option<Player>, StoreError>;

    async fn find_by_puuid(&self, puuid: &str) -> Result<Option<Player>, StoreError>;

    /// Replace the stored record with the same id and bump `updated_at`.
    async fn update(&self, player: &Player) -> Result<Player, StoreError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<Player>, StoreError>;

    async fn find_by_server(&self, server: Server) -> Result<Vec<Player>, StoreError>;

    /// Filtered page, newest first.
    async fn page(&self, query: &PlayerQuery) -> Result<PlayerPage<Player>, StoreError>;

    /// Returns `false` when nothing was removed.
    async fn delete(&self, id: &PlayerId) -> Result<bool, StoreError>;

    async fn delete_by_identity(&self, identity: &PlayerIdentity) -> Result<bool, StoreError>;

    async fn exists(&self, identity: &PlayerIdentity) -> Result<bool, StoreError> {
        Ok(self.find_by_identity(identity).await?.is_some())
    }
}

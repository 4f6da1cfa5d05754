use std::{fmt, time::SystemTime};

use serde::{Deserialize, Serialize};

use crate::{PlayerIdentity, Puuid, Server};

/// Tier reported for players without a solo/duo placement.
pub const UNRANKED_TIER: &str = "UNRANKED";

/// Queue type of the ranked solo/duo ladder.
pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

/// Store-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlayerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Solo/duo ladder standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedStats {
    /// `"GOLD"`, `"DIAMOND"`, ... or [`UNRANKED_TIER`].
    pub tier: String,
    /// Division inside the tier (`"I"`..`"IV"`), empty when unranked.
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl RankedStats {
    pub fn unranked() -> Self {
        Self {
            tier: UNRANKED_TIER.to_string(),
            rank: String::new(),
            league_points: 0,
            wins: 0,
            losses: 0,
        }
    }

    pub fn is_ranked(&self) -> bool {
        self.tier != UNRANKED_TIER
    }

    /// Win percentage over ranked games, `None` with no games played.
    pub fn winrate(&self) -> Option<f64> {
        let games = self.wins + self.losses;
        (games > 0).then(|| f64::from(self.wins) * 100.0 / f64::from(games))
    }
}

impl Default for RankedStats {
    fn default() -> Self {
        Self::unranked()
    }
}

/// A tracked player as stored in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Assigned by the store on create; `None` before the first write.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    pub puuid: Puuid,
    pub game_name: String,
    pub tag_line: String,
    pub server: Server,
    pub summoner_id: String,
    pub summoner_level: u32,
    pub profile_icon_id: u32,
    #[serde(flatten)]
    pub ranked: RankedStats,
    #[serde(with = "time_serde")]
    pub created_at: SystemTime,
    #[serde(with = "time_serde")]
    pub updated_at: SystemTime,
}

impl Player {
    pub fn identity(&self) -> PlayerIdentity {
        PlayerIdentity::new(self.game_name.clone(), self.tag_line.clone(), self.server)
    }

    pub fn matches(&self, identity: &PlayerIdentity) -> bool {
        self.game_name == identity.game_name
            && self.tag_line == identity.tag_line
            && self.server == identity.server
    }
}

mod time_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::{SystemTime, UNIX_EPOCH};

    pub fn serialize<S>(time: &SystemTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let since_epoch = time
            .duration_since(UNIX_EPOCH)
            .map_err(serde::ser::Error::custom)?;
        since_epoch.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SystemTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(UNIX_EPOCH + std::time::Duration::from_secs(secs))
    }
}

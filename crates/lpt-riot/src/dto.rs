use serde::{Deserialize, Serialize};

use lpt_model::{RANKED_SOLO_QUEUE, RankedStats};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    #[serde(default)]
    pub game_name: Option<String>,
    #[serde(default)]
    pub tag_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub puuid: String,
    #[serde(default)]
    pub profile_icon_id: u32,
    #[serde(default)]
    pub revision_date: i64,
    #[serde(default)]
    pub summoner_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    #[serde(default)]
    pub league_id: String,
    pub queue_type: String,
    pub tier: String,
    pub rank: String,
    pub league_points: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub inactive: bool,
}

impl From<&LeagueEntryDto> for RankedStats {
    fn from(entry: &LeagueEntryDto) -> Self {
        RankedStats {
            tier: entry.tier.clone(),
            rank: entry.rank.clone(),
            league_points: entry.league_points,
            wins: entry.wins,
            losses: entry.losses,
        }
    }
}

/// Solo/duo standing out of every queue entry; unranked when absent.
pub fn find_ranked_solo(entries: &[LeagueEntryDto]) -> RankedStats {
    entries
        .iter()
        .find(|e| e.queue_type == RANKED_SOLO_QUEUE)
        .map(RankedStats::from)
        .unwrap_or_else(RankedStats::unranked)
}

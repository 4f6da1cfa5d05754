//! Ranked-stats lookups against the Riot Games HTTP API.
//!
//! [`RankLookup`] is the seam the tracking service depends on; [`RiotClient`]
//! is the production implementation composing the account, summoner and
//! league endpoints.

mod client;
pub use client::RiotClient;

mod config;
pub use config::RiotConfig;

mod dto;
pub use dto::{AccountDto, LeagueEntryDto, SummonerDto, find_ranked_solo};

mod errors;
pub use errors::LookupError;

mod lookup;
pub use lookup::{RankLookup, RankedProfile};

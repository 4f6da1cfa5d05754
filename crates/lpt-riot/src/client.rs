use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use lpt_model::{PlayerIdentity, RankedStats, Server};

use crate::config::RiotConfig;
use crate::dto::{AccountDto, LeagueEntryDto, SummonerDto, find_ranked_solo};
use crate::errors::LookupError;
use crate::lookup::{RankLookup, RankedProfile};

const TOKEN_HEADER: &str = "X-Riot-Token";

/// Riot Games HTTP client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct RiotClient {
    http: reqwest::Client,
    cfg: Arc<RiotConfig>,
}

impl RiotClient {
    pub fn new(cfg: RiotConfig) -> Result<Self, LookupError> {
        cfg.validate()?;
        let http = reqwest::Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self {
            http,
            cfg: Arc::new(cfg),
        })
    }

    fn account_base(&self) -> String {
        match &self.cfg.base_url {
            Some(base) => base.clone(),
            None => format!("https://{}.api.riotgames.com", self.cfg.account_region),
        }
    }

    fn platform_base(&self, server: Server) -> String {
        match &self.cfg.base_url {
            Some(base) => base.clone(),
            None => format!("https://{}", server.platform_host()),
        }
    }

    pub async fn account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, LookupError> {
        let url = endpoint(
            &self.account_base(),
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        match self.get_json(url).await {
            Err(LookupError::Status { code: 404, .. }) => Err(LookupError::NotFound {
                riot_id: format!("{game_name}#{tag_line}"),
            }),
            other => other,
        }
    }

    pub async fn summoner_by_puuid(
        &self,
        puuid: &str,
        server: Server,
    ) -> Result<SummonerDto, LookupError> {
        let url = endpoint(
            &self.platform_base(server),
            &["lol", "summoner", "v4", "summoners", "by-puuid", puuid],
        )?;
        self.get_json(url).await
    }

    pub async fn league_entries(
        &self,
        summoner_id: &str,
        server: Server,
    ) -> Result<Vec<LeagueEntryDto>, LookupError> {
        let url = endpoint(
            &self.platform_base(server),
            &["lol", "league", "v4", "entries", "by-summoner", summoner_id],
        )?;
        self.get_json(url).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, LookupError> {
        debug!(%url, "riot api request");
        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.cfg.api_key)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(LookupError::RateLimited { retry_after_secs });
        }

        let body = response.text().await?;
        if status != StatusCode::OK {
            return Err(LookupError::Status {
                code: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(|e| {
            LookupError::InvalidResponse(format!("failed to parse response: {}, body: {}", e, body))
        })
    }
}

#[async_trait]
impl RankLookup for RiotClient {
    #[instrument(level = "debug", skip(self), fields(player = %identity))]
    async fn lookup(&self, identity: &PlayerIdentity) -> Result<RankedProfile, LookupError> {
        let account = self
            .account_by_riot_id(&identity.game_name, &identity.tag_line)
            .await?;
        let summoner = self.summoner_by_puuid(&account.puuid, identity.server).await?;

        // A player without ladder data is still trackable.
        let ranked = match self.league_entries(&summoner.id, identity.server).await {
            Ok(entries) => find_ranked_solo(&entries),
            Err(e) => {
                warn!(error = %e, "league entries unavailable; recording player as unranked");
                RankedStats::unranked()
            }
        };

        Ok(RankedProfile {
            puuid: account.puuid,
            summoner_id: summoner.id,
            summoner_level: summoner.summoner_level,
            profile_icon_id: summoner.profile_icon_id,
            ranked,
        })
    }

    #[instrument(level = "debug", skip(self))]
    async fn refresh(&self, puuid: &str, server: Server) -> Result<RankedProfile, LookupError> {
        let summoner = self.summoner_by_puuid(puuid, server).await?;
        let entries = self.league_entries(&summoner.id, server).await?;

        Ok(RankedProfile {
            puuid: puuid.to_string(),
            summoner_id: summoner.id,
            summoner_level: summoner.summoner_level,
            profile_icon_id: summoner.profile_icon_id,
            ranked: find_ranked_solo(&entries),
        })
    }
}

/// Join percent-encoded path segments onto `base`.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url, LookupError> {
    let mut url = Url::parse(base).map_err(|e| LookupError::InvalidUrl(format!("{base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| LookupError::InvalidUrl(format!("{base}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lpt_model::{CommandId, Invocation, Player, PlayerIdentity, PlayerQuery, Server};

use crate::{error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    pub fn new(handler: Arc<H>) -> Self {
        Self { handler }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - POST /api/v1/commands - Submit command
    /// - GET /api/v1/commands/{id} - Get command reply
    /// - GET /api/v1/stats - Executor counters
    /// - GET /api/v1/players - Browse tracked players
    /// - GET /api/v1/players/{server}/{name}/{tag} - One tracked player
    pub fn router(self) -> Router {
        Router::new()
            .route("/api/v1/commands", post(submit_command::<H>))
            .route("/api/v1/commands/{id}", get(get_command::<H>))
            .route("/api/v1/stats", get(get_stats::<H>))
            .route("/api/v1/players", get(list_players::<H>))
            .route("/api/v1/players/{server}/{name}/{tag}", get(find_player::<H>))
            .with_state(self.handler)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitCommandResponse {
    /// `None` when the command name was not recognized.
    command_id: Option<CommandId>,
}

#[derive(Debug, Deserialize)]
struct ListPlayersParams {
    server: Option<String>,
    /// 1-based page (default 1)
    page: Option<usize>,
    /// Max items per page (default 20, max 100)
    limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ListPlayersResponse {
    players: Vec<Player>,
    total: usize,
}

/// POST /api/v1/commands
async fn submit_command<H>(
    State(handler): State<Arc<H>>,
    Json(invocation): Json<Invocation>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    debug!(command = %invocation.name, "submitting command");
    let command_id = handler.submit_command(invocation).await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitCommandResponse { command_id }),
    ))
}

/// GET /api/v1/commands/{id}
async fn get_command<H>(
    State(handler): State<Arc<H>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let command_id = CommandId::from(id);
    let reply = handler
        .command_status(&command_id)
        .await?
        .ok_or_else(|| ApiError::CommandNotFound(command_id.to_string()))?;
    Ok(Json(reply))
}

/// GET /api/v1/stats
async fn get_stats<H>(State(handler): State<Arc<H>>) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    Ok(Json(handler.stats().await?))
}

/// GET /api/v1/players
///
/// Query params (all optional):
/// - ?server=euw1 - filter by server (aliases accepted)
/// - ?page=2      - 1-based page
/// - ?limit=50    - items per page
async fn list_players<H>(
    State(handler): State<Arc<H>>,
    Query(params): Query<ListPlayersParams>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let mut query = PlayerQuery::new();

    if let Some(server) = params.server {
        let server: Server = server
            .parse()
            .map_err(|e: lpt_model::ModelError| ApiError::InvalidRequest(e.to_string()))?;
        query = query.with_server(server);
    }
    if let Some(page) = params.page {
        query = query.with_page(page);
    }
    if let Some(limit) = params.limit {
        query = query.with_limit(limit);
    }

    let page = handler.query_players(query).await?;
    debug!(count = page.items.len(), total = page.total, "players listed");

    Ok(Json(ListPlayersResponse {
        players: page.items,
        total: page.total,
    }))
}

/// GET /api/v1/players/{server}/{name}/{tag}
async fn find_player<H>(
    State(handler): State<Arc<H>>,
    Path((server, name, tag)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, ApiError>
where
    H: ApiHandler,
{
    let server: Server = server
        .parse()
        .map_err(|e: lpt_model::ModelError| ApiError::InvalidRequest(e.to_string()))?;
    let identity = PlayerIdentity::new(name, tag, server);
    let player = handler
        .find_player(identity.clone())
        .await?
        .ok_or_else(|| ApiError::PlayerNotFound(identity.to_string()))?;
    Ok(Json(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CommandBoard, CoreAdapter};

    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::Request,
    };
    use lpt_core::{
        CommandExecutor, ExecutorConfig, InMemoryStore, PlayerStore, TrackingService,
    };
    use lpt_model::RankedStats;
    use lpt_riot::{LookupError, RankLookup, RankedProfile};
    use serde_json::{Value, json};
    use std::time::{Duration, SystemTime};
    use tower::ServiceExt;

    struct OnlyCaps;

    #[async_trait]
    impl RankLookup for OnlyCaps {
        async fn lookup(&self, identity: &PlayerIdentity) -> Result<RankedProfile, LookupError> {
            if identity.game_name != "Caps" {
                return Err(LookupError::NotFound {
                    riot_id: identity.riot_id(),
                });
            }
            Ok(RankedProfile {
                puuid: "puuid-caps".into(),
                summoner_id: "s-caps".into(),
                summoner_level: 400,
                profile_icon_id: 1,
                ranked: RankedStats {
                    tier: "MASTER".into(),
                    rank: "I".into(),
                    league_points: 210,
                    wins: 50,
                    losses: 40,
                },
            })
        }

        async fn refresh(
            &self,
            _puuid: &str,
            _server: Server,
        ) -> Result<RankedProfile, LookupError> {
            Err(LookupError::InvalidResponse("not used".into()))
        }
    }

    fn app(store: InMemoryStore) -> Router {
        let service = Arc::new(TrackingService::new(Arc::new(store), Arc::new(OnlyCaps)));
        let executor = Arc::new(CommandExecutor::new(service, ExecutorConfig::default()));
        let adapter = CoreAdapter::new(executor, CommandBoard::default());
        HttpApi::new(Arc::new(adapter)).router()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn post(body: Value) -> Request<Body> {
        Request::post("/api/v1/commands")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn wait_terminal(app: &Router, id: &str) -> Value {
        for _ in 0..200 {
            let (status, body) = send(app, get(&format!("/api/v1/commands/{id}"))).await;
            assert_eq!(status, StatusCode::OK);
            if !matches!(body["status"].as_str(), Some("pending" | "running")) {
                return body;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("command {id} never finished");
    }

    #[tokio::test]
    async fn add_player_runs_and_reply_is_retrievable() {
        let store = InMemoryStore::new();
        let app = app(store.clone());

        let (status, body) = send(
            &app,
            post(json!({
                "name": "add_player",
                "options": {"pseudo": "Caps", "tagline": "EUW", "server": "euw"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let id = body["commandId"].as_str().unwrap().to_string();

        let reply = wait_terminal(&app, &id).await;
        assert_eq!(reply["status"], "succeeded");
        assert_eq!(reply["command"], "add_player");
        assert!(reply["message"].as_str().unwrap().contains("Successfully added **Caps#EUW**"));
        assert_eq!(store.len(), 1);

        let (_, stats) = send(&app, get("/api/v1/stats")).await;
        assert_eq!(stats["total"], 1);
        assert_eq!(stats["active"], 0);
        assert_eq!(stats["workers"], 2);
    }

    #[tokio::test]
    async fn unknown_player_reply_carries_tips() {
        let app = app(InMemoryStore::new());
        let (_, body) = send(
            &app,
            post(json!({
                "name": "add_player",
                "options": {"pseudo": "Ghost", "tagline": "000", "server": "kr"}
            })),
        )
        .await;
        let reply = wait_terminal(&app, body["commandId"].as_str().unwrap()).await;

        assert_eq!(reply["status"], "failed");
        assert_eq!(reply["outcome"], "not_found");
        assert!(reply["message"].as_str().unwrap().contains("Tips"));
    }

    #[tokio::test]
    async fn unknown_command_is_accepted_and_dropped() {
        let app = app(InMemoryStore::new());
        let (status, body) = send(&app, post(json!({"name": "dance"}))).await;

        assert_eq!(status, StatusCode::ACCEPTED);
        assert!(body["commandId"].is_null());
        let (_, stats) = send(&app, get("/api/v1/stats")).await;
        assert_eq!(stats["total"], 0);
    }

    #[tokio::test]
    async fn missing_option_is_bad_request() {
        let app = app(InMemoryStore::new());
        let (status, body) = send(
            &app,
            post(json!({"name": "add_player", "options": {"pseudo": "Caps"}})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("tagline"));
    }

    #[tokio::test]
    async fn unknown_command_id_is_not_found() {
        let app = app(InMemoryStore::new());
        let (status, _) = send(&app, get("/api/v1/commands/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn players_can_be_filtered_by_server() {
        let store = InMemoryStore::new();
        for (name, server) in [("A", Server::Kr), ("B", Server::Euw1), ("C", Server::Kr)] {
            let now = SystemTime::now();
            store
                .create(Player {
                    id: None,
                    puuid: format!("puuid-{name}"),
                    game_name: name.into(),
                    tag_line: "T".into(),
                    server,
                    summoner_id: String::new(),
                    summoner_level: 1,
                    profile_icon_id: 0,
                    ranked: RankedStats::unranked(),
                    created_at: now,
                    updated_at: now,
                })
                .await
                .unwrap();
        }
        let app = app(store);

        let (status, body) = send(&app, get("/api/v1/players?server=KR&limit=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["players"][0]["gameName"], "C");

        let (status, _) = send(&app, get("/api/v1/players?server=moon")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn tracked_player_can_be_fetched_by_riot_id() {
        let app = app(InMemoryStore::new());
        let (_, body) = send(
            &app,
            post(json!({
                "name": "add_player",
                "options": {"pseudo": "Caps", "tagline": "EUW", "server": "euw1"}
            })),
        )
        .await;
        wait_terminal(&app, body["commandId"].as_str().unwrap()).await;

        let (status, player) = send(&app, get("/api/v1/players/euw/Caps/EUW")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(player["puuid"], "puuid-caps");
        assert_eq!(player["tier"], "MASTER");

        let (status, body) = send(&app, get("/api/v1/players/kr/Caps/EUW")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Caps#EUW"));

        let (status, _) = send(&app, get("/api/v1/players/moon/Caps/EUW")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

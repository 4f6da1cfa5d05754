//! User-facing reply text.

use std::fmt::Write;

use lpt_core::{CommandOutput, ErrorKind, Outcome, TrackError};
use lpt_model::{Command, Player, PlayerIdentity};

/// Players shown in a listing before the remainder is summarized.
pub const LIST_LIMIT: usize = 20;

pub fn outcome(command: &Command, outcome: &Outcome) -> String {
    match (outcome, command) {
        (Outcome::Success(CommandOutput::Added(player)), _) => added(player),
        (Outcome::Success(CommandOutput::Listed(players)), _) => listed(players),
        (Outcome::Failure(err), Command::AddPlayer(identity)) => add_failure(identity, err),
        (Outcome::Failure(err), Command::ListPlayers) => {
            format!("❌ Failed to fetch players from database: {err}")
        }
        (Outcome::Timeout, Command::AddPlayer(_)) => {
            "❌ Request timed out. Please try again later.".to_string()
        }
        (Outcome::Timeout, Command::ListPlayers) => "❌ Request timed out".to_string(),
    }
}

pub fn added(player: &Player) -> String {
    let rank = if player.ranked.is_ranked() {
        format!(
            "🏆 **{} {}** • {} LP",
            player.ranked.tier, player.ranked.rank, player.ranked.league_points
        )
    } else {
        "🆕 **Unranked**".to_string()
    };
    format!(
        "✅ Successfully added **{}#{}** ({})\n📊 **Level:** {}\n{}",
        player.game_name, player.tag_line, player.server, player.summoner_level, rank
    )
}

pub fn listed(players: &[Player]) -> String {
    if players.is_empty() {
        return "📭 No players tracked yet!\nUse `/add_player` to start tracking.".to_string();
    }

    let mut out = format!("📋 **Tracked Players ({})**\n\n", players.len());
    for player in players.iter().take(LIST_LIMIT) {
        let rank = if player.ranked.is_ranked() {
            format!(
                "🏆 {} {} {} LP",
                player.ranked.tier, player.ranked.rank, player.ranked.league_points
            )
        } else {
            "🆕 Unranked".to_string()
        };
        let _ = write!(
            out,
            "👤 **{}#{}** ({})\n   📊 Level {} • {}\n\n",
            player.game_name, player.tag_line, player.server, player.summoner_level, rank
        );
    }
    if players.len() > LIST_LIMIT {
        let _ = writeln!(out, "... and {} more players", players.len() - LIST_LIMIT);
    }
    out
}

pub fn add_failure(identity: &PlayerIdentity, err: &TrackError) -> String {
    let PlayerIdentity {
        game_name,
        tag_line,
        server,
    } = identity;
    match err.kind() {
        ErrorKind::AlreadyTracked => {
            format!("❌ Player **{game_name}#{tag_line}** ({server}) is already being tracked!")
        }
        ErrorKind::NotFound => format!(
            "❌ Player **{game_name}#{tag_line}** not found on server **{server}**\n\n\
             💡 **Tips:**\n\
             • Check the spelling of the name and tagline\n\
             • Make sure the server is correct\n\
             • The player might not exist or have never played ranked"
        ),
        ErrorKind::Upstream => {
            format!("❌ Failed to add player **{game_name}#{tag_line}**\n\n**Error:** {err}")
        }
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Server;

/// Riot ID plus platform: the user-facing key of a tracked player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerIdentity {
    pub game_name: String,
    pub tag_line: String,
    pub server: Server,
}

impl PlayerIdentity {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>, server: Server) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
            server,
        }
    }

    /// `GameName#TAG`, without the server.
    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{} ({})", self.game_name, self.tag_line, self.server)
    }
}

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

use crate::{ModelError, PlayerIdentity, Server};

/// Identifier handed back to the caller when a command is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CommandId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CommandId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw inbound command as produced by a front-end.
///
/// Option values are plain strings; [`Command::from_invocation`] turns them
/// into typed arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    pub name: String,
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl Invocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BTreeMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    fn require(&self, key: &'static str) -> Result<&str, ModelError> {
        let value = self
            .options
            .get(key)
            .ok_or(ModelError::MissingOption(key))?
            .trim();
        if value.is_empty() {
            return Err(ModelError::EmptyOption(key));
        }
        Ok(value)
    }
}

/// Operations reachable from the command surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    AddPlayer,
    ListPlayers,
}

impl CommandKind {
    pub const ADD_PLAYER: &'static str = "add_player";
    pub const LIST_PLAYERS: &'static str = "list_players";

    /// Resolve a command name; `None` for anything unrecognized.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            Self::ADD_PLAYER => Some(CommandKind::AddPlayer),
            Self::LIST_PLAYERS => Some(CommandKind::ListPlayers),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::AddPlayer => Self::ADD_PLAYER,
            CommandKind::ListPlayers => Self::LIST_PLAYERS,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed command with typed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddPlayer(PlayerIdentity),
    ListPlayers,
}

impl Command {
    pub const OPT_PSEUDO: &'static str = "pseudo";
    pub const OPT_TAGLINE: &'static str = "tagline";
    pub const OPT_SERVER: &'static str = "server";

    pub fn kind(&self) -> CommandKind {
        match self {
            Command::AddPlayer(_) => CommandKind::AddPlayer,
            Command::ListPlayers => CommandKind::ListPlayers,
        }
    }

    /// Build the typed form of `invocation` for an already resolved `kind`.
    pub fn from_invocation(kind: CommandKind, invocation: &Invocation) -> Result<Self, ModelError> {
        match kind {
            CommandKind::AddPlayer => {
                let game_name = invocation.require(Self::OPT_PSEUDO)?;
                let tag_line = invocation.require(Self::OPT_TAGLINE)?;
                let tag_line = tag_line.trim_start_matches('#');
                let server: Server = invocation.require(Self::OPT_SERVER)?.parse()?;
                Ok(Command::AddPlayer(PlayerIdentity::new(
                    game_name, tag_line, server,
                )))
            }
            CommandKind::ListPlayers => Ok(Command::ListPlayers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_names_only() {
        assert_eq!(CommandKind::from_name("add_player"), Some(CommandKind::AddPlayer));
        assert_eq!(CommandKind::from_name("list_players"), Some(CommandKind::ListPlayers));
        assert_eq!(CommandKind::from_name("remove_player"), None);
        assert_eq!(CommandKind::from_name("ADD_PLAYER"), None);
    }

    #[test]
    fn parses_add_player_options() {
        let inv = Invocation::new("add_player")
            .with_option("pseudo", " Caps ")
            .with_option("tagline", "#EUW")
            .with_option("server", "EUW");

        let cmd = Command::from_invocation(CommandKind::AddPlayer, &inv).unwrap();
        assert_eq!(
            cmd,
            Command::AddPlayer(PlayerIdentity::new("Caps", "EUW", Server::Euw1))
        );
        assert_eq!(cmd.kind(), CommandKind::AddPlayer);
    }

    #[test]
    fn add_player_requires_every_option() {
        let inv = Invocation::new("add_player")
            .with_option("pseudo", "Caps")
            .with_option("server", "euw1");
        assert_eq!(
            Command::from_invocation(CommandKind::AddPlayer, &inv),
            Err(ModelError::MissingOption("tagline"))
        );

        let inv = inv.with_option("tagline", "   ");
        assert_eq!(
            Command::from_invocation(CommandKind::AddPlayer, &inv),
            Err(ModelError::EmptyOption("tagline"))
        );
    }

    #[test]
    fn add_player_rejects_unknown_server() {
        let inv = Invocation::new("add_player")
            .with_option("pseudo", "Caps")
            .with_option("tagline", "EUW")
            .with_option("server", "moon");
        assert!(matches!(
            Command::from_invocation(CommandKind::AddPlayer, &inv),
            Err(ModelError::UnsupportedServer(_))
        ));
    }

    #[test]
    fn list_players_ignores_options() {
        let inv = Invocation::new("list_players").with_option("page", "2");
        assert_eq!(
            Command::from_invocation(CommandKind::ListPlayers, &inv),
            Ok(Command::ListPlayers)
        );
    }
}

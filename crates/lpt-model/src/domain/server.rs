use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Riot platform a player account lives on.
///
/// Serialized as the lowercase platform code (`"euw1"`, `"kr"`, ...).
/// Parsing is case-insensitive and also accepts the short region aliases
/// players usually type (`"euw"`, `"na"`, `"lan"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Server {
    Euw1,
    Eun1,
    Na1,
    Kr,
    Jp1,
    Br1,
    La1,
    La2,
    Oc1,
    Tr1,
    Ru,
}

impl Server {
    /// Every supported platform, in the order they are offered to users.
    pub const ALL: [Server; 11] = [
        Server::Euw1,
        Server::Eun1,
        Server::Na1,
        Server::Kr,
        Server::Jp1,
        Server::Br1,
        Server::La1,
        Server::La2,
        Server::Oc1,
        Server::Tr1,
        Server::Ru,
    ];

    /// Comma separated list of every canonical code.
    pub fn codes() -> String {
        Server::ALL
            .iter()
            .map(Server::code)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Canonical platform code.
    pub fn code(&self) -> &'static str {
        match self {
            Server::Euw1 => "euw1",
            Server::Eun1 => "eun1",
            Server::Na1 => "na1",
            Server::Kr => "kr",
            Server::Jp1 => "jp1",
            Server::Br1 => "br1",
            Server::La1 => "la1",
            Server::La2 => "la2",
            Server::Oc1 => "oc1",
            Server::Tr1 => "tr1",
            Server::Ru => "ru",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Server::Euw1 => "EUW (Europe West)",
            Server::Eun1 => "EUNE (Europe Nordic & East)",
            Server::Na1 => "NA (North America)",
            Server::Kr => "KR (Korea)",
            Server::Jp1 => "JP (Japan)",
            Server::Br1 => "BR (Brazil)",
            Server::La1 => "LAN (Latin America North)",
            Server::La2 => "LAS (Latin America South)",
            Server::Oc1 => "OCE (Oceania)",
            Server::Tr1 => "TR (Turkey)",
            Server::Ru => "RU (Russia)",
        }
    }

    /// Host serving the platform-scoped APIs (summoner, league).
    pub fn platform_host(&self) -> String {
        format!("{}.api.riotgames.com", self.code())
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}

impl FromStr for Server {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "euw1" | "euw" => Ok(Server::Euw1),
            "eun1" | "eune" => Ok(Server::Eun1),
            "na1" | "na" => Ok(Server::Na1),
            "kr" => Ok(Server::Kr),
            "jp1" | "jp" => Ok(Server::Jp1),
            "br1" | "br" => Ok(Server::Br1),
            "la1" | "lan" => Ok(Server::La1),
            "la2" | "las" => Ok(Server::La2),
            "oc1" | "oce" => Ok(Server::Oc1),
            "tr1" | "tr" => Ok(Server::Tr1),
            "ru" => Ok(Server::Ru),
            _ => Err(ModelError::UnsupportedServer(s.to_string())),
        }
    }
}

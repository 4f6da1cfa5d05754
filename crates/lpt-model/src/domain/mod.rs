mod server;
pub use server::Server;

mod identity;
pub use identity::PlayerIdentity;

mod player;
pub use player::{Player, PlayerId, RankedStats, RANKED_SOLO_QUEUE, UNRANKED_TIER};

mod command;
pub use command::{Command, CommandId, CommandKind, Invocation};

mod player_query;
pub use player_query::{PlayerPage, PlayerQuery};

/// Provider-issued stable player identifier.
pub type Puuid = String;

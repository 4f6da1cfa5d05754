use lpt_model::{Command, CommandKind, Invocation};
use tracing::{instrument, trace};

use crate::error::CoreError;

/// Maps inbound invocations onto typed commands.
///
/// Names outside [`CommandKind`] are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandRouter;

impl CommandRouter {
    pub fn new() -> Self {
        Self
    }

    pub fn pick(&self, name: &str) -> Option<CommandKind> {
        CommandKind::from_name(name)
    }

    /// `Ok(None)` for names this router does not handle.
    #[instrument(level = "trace", skip(self, invocation), fields(command = %invocation.name))]
    pub fn route(&self, invocation: &Invocation) -> Result<Option<Command>, CoreError> {
        let Some(kind) = self.pick(&invocation.name) else {
            trace!("unrecognized command ignored");
            return Ok(None);
        };
        let command = Command::from_invocation(kind, invocation)?;
        trace!(%kind, "command routed");
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpt_model::{ModelError, PlayerIdentity, Server};

    #[test]
    fn unknown_names_are_dropped_silently() {
        let router = CommandRouter::new();
        assert!(router.route(&Invocation::new("remove_player")).unwrap().is_none());
        assert!(router.route(&Invocation::new("")).unwrap().is_none());
    }

    #[test]
    fn known_names_become_commands() {
        let router = CommandRouter::new();
        let inv = Invocation::new("add_player")
            .with_option("pseudo", "Caps")
            .with_option("tagline", "EUW")
            .with_option("server", "euw");
        assert_eq!(
            router.route(&inv).unwrap(),
            Some(Command::AddPlayer(PlayerIdentity::new("Caps", "EUW", Server::Euw1)))
        );
        assert_eq!(
            router.route(&Invocation::new("list_players")).unwrap(),
            Some(Command::ListPlayers)
        );
    }

    #[test]
    fn bad_options_are_an_error() {
        let router = CommandRouter::new();
        let err = router.route(&Invocation::new("add_player")).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidArguments(ModelError::MissingOption("pseudo"))
        ));
    }

    #[test]
    fn pick_is_exact_on_names() {
        let router = CommandRouter::new();
        assert_eq!(router.pick("add_player"), Some(CommandKind::AddPlayer));
        assert_eq!(router.pick("list_players"), Some(CommandKind::ListPlayers));
        assert_eq!(router.pick("Add_Player"), None);
    }
}

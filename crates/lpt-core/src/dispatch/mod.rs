//! Entry point turning invocations into running commands.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, instrument};
use uuid::Uuid;

use lpt_model::{Command, CommandId, CommandKind, Invocation};

use crate::{error::CoreError, executor::CommandExecutor, executor::Outcome, router::CommandRouter};

/// Front-end side of a command: how acknowledgements and results reach the user.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// Called once a pool slot is held, before the work starts.
    async fn acknowledge(&self, id: &CommandId, command: &Command);

    /// Called exactly once with the final outcome.
    async fn respond(&self, id: &CommandId, command: &Command, outcome: &Outcome);
}

/// A command accepted for execution.
pub struct Dispatched {
    pub id: CommandId,
    pub kind: CommandKind,
    pub handle: JoinHandle<Outcome>,
}

/// Routes invocations and runs each accepted command on its own task.
pub struct Dispatcher {
    router: CommandRouter,
    executor: Arc<CommandExecutor>,
    responder: Arc<dyn Responder>,
}

impl Dispatcher {
    pub fn new(executor: Arc<CommandExecutor>, responder: Arc<dyn Responder>) -> Self {
        Self {
            router: CommandRouter::new(),
            executor,
            responder,
        }
    }

    pub fn executor(&self) -> &Arc<CommandExecutor> {
        &self.executor
    }

    /// Accept `invocation` without waiting for it to run.
    ///
    /// Returns `Ok(None)` for unrecognized names. Must be called inside a
    /// tokio runtime.
    #[instrument(level = "debug", skip(self, invocation), fields(command = %invocation.name))]
    pub fn dispatch(&self, invocation: &Invocation) -> Result<Option<Dispatched>, CoreError> {
        let Some(command) = self.router.route(invocation)? else {
            return Ok(None);
        };

        let id = CommandId::from(Uuid::new_v4().to_string());
        let kind = command.kind();
        debug!(command_id = %id, %kind, "command accepted");

        let executor = Arc::clone(&self.executor);
        let responder = Arc::clone(&self.responder);
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            executor
                .execute(&task_id, &command, responder.as_ref())
                .await
        });

        Ok(Some(Dispatched { id, kind, handle }))
    }
}

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use lpt_core::{Outcome, Responder};
use lpt_model::{Command, CommandId, CommandKind};

use crate::render;

/// Lifecycle of a submitted command as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    /// Accepted, waiting for a worker slot.
    Pending,
    /// Acknowledged; the work is running.
    Running,
    Succeeded,
    Failed,
    Timeout,
}

impl CommandStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CommandStatus::Succeeded | CommandStatus::Failed | CommandStatus::Timeout
        )
    }
}

impl From<&Outcome> for CommandStatus {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Success(_) => CommandStatus::Succeeded,
            Outcome::Failure(_) => CommandStatus::Failed,
            Outcome::Timeout => CommandStatus::Timeout,
        }
    }
}

/// The reply record for one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandReply {
    pub id: CommandId,
    pub command: CommandKind,
    pub status: CommandStatus,
    /// Rendered reply, set once the command is terminal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Metrics label of the outcome (`success`, `not_found`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

/// Bounded store of recent command replies.
///
/// Acts as the [`Responder`] for HTTP-submitted commands. Once `capacity` is
/// reached the oldest reply is evicted.
#[derive(Clone)]
pub struct CommandBoard {
    inner: Arc<RwLock<BoardInner>>,
    capacity: usize,
}

struct BoardInner {
    replies: HashMap<CommandId, CommandReply>,
    /// Insertion order, oldest first.
    order: VecDeque<CommandId>,
}

impl CommandBoard {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoardInner {
                replies: HashMap::new(),
                order: VecDeque::new(),
            })),
            capacity: capacity.max(1),
        }
    }

    /// Record `id` as pending unless the executor already reported on it.
    pub fn register(&self, id: &CommandId, kind: CommandKind) {
        self.upsert(id, kind, |_| {});
    }

    pub fn get(&self, id: &CommandId) -> Option<CommandReply> {
        let inner = self.inner.read().unwrap();
        inner.replies.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn upsert(&self, id: &CommandId, kind: CommandKind, apply: impl FnOnce(&mut CommandReply)) {
        let mut inner = self.inner.write().unwrap();

        if !inner.replies.contains_key(id) {
            while inner.order.len() >= self.capacity {
                if let Some(old) = inner.order.pop_front() {
                    inner.replies.remove(&old);
                }
            }
            inner.order.push_back(id.clone());
            inner.replies.insert(
                id.clone(),
                CommandReply {
                    id: id.clone(),
                    command: kind,
                    status: CommandStatus::Pending,
                    message: None,
                    outcome: None,
                },
            );
        }

        if let Some(reply) = inner.replies.get_mut(id) {
            apply(reply);
        }
    }
}

impl Default for CommandBoard {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl Responder for CommandBoard {
    async fn acknowledge(&self, id: &CommandId, command: &Command) {
        self.upsert(id, command.kind(), |reply| {
            if !reply.status.is_terminal() {
                reply.status = CommandStatus::Running;
            }
        });
        trace!(command_id = %id, "command running");
    }

    async fn respond(&self, id: &CommandId, command: &Command, outcome: &Outcome) {
        let message = render::outcome(command, outcome);
        self.upsert(id, command.kind(), |reply| {
            reply.status = CommandStatus::from(outcome);
            reply.message = Some(message);
            reply.outcome = Some(outcome.label().to_string());
        });
        trace!(command_id = %id, outcome = %outcome.label(), "command reply stored");
    }
}

//! Side effects requested by the event handler.
//!
//! The handler never talks to the host. It returns a `Vec<Action>` per event
//! and the plugin runtime executes them in order.

use crate::query::{CancellationToken, QueryCommand};
use crate::worker::WorkerMessage;

/// Commands executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Issue a GET request. The token must be attached to the request context
    /// so that the response can be routed back.
    Fetch {
        url: String,
        token: CancellationToken,
    },

    /// Abandon the request issued under `token`.
    ///
    /// The host cannot abort an issued web request; the runtime records the
    /// cancellation and the late response is dropped by the token check.
    Cancel { token: CancellationToken },

    /// Post a message to the background worker.
    PostToWorker(WorkerMessage),

    /// Rename the plugin pane.
    SetPaneTitle(String),

    /// Hide the plugin.
    CloseFocus,
}

impl From<QueryCommand> for Action {
    fn from(command: QueryCommand) -> Self {
        match command {
            QueryCommand::Fetch { url, token } => Self::Fetch { url, token },
            QueryCommand::Cancel { token } => Self::Cancel { token },
        }
    }
}

/// Converts query commands into runtime actions, preserving order.
pub(crate) fn from_commands(commands: Vec<QueryCommand>) -> Vec<Action> {
    commands.into_iter().map(Action::from).collect()
}

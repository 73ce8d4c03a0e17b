//! Commands queued from the UI to the backend worker.

use eloelo_shared::protocol::UiCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum BackendCommand {
    Remote(UiCommand),
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Remote(command) => command.name(),
            BackendCommand::Shutdown => "shutdown",
        }
    }
}

impl From<UiCommand> for BackendCommand {
    fn from(command: UiCommand) -> Self {
        BackendCommand::Remote(command)
    }
}

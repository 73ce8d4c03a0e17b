use std::sync::Arc;

use eloelo_shared::{
    protocol::{DiscordPlayerInfo, PlayerAvatar},
    view::{extract_avatars, EloEloState},
};
use tracing::error;

use crate::ClientEvent;

/// Latest snapshot of everything the backend pushed. Every event replaces
/// whole fields; nothing is merged.
#[derive(Debug, Clone, Default)]
pub struct ViewStore {
    state: Arc<EloEloState>,
    discord_info: Vec<DiscordPlayerInfo>,
    avatars: Vec<PlayerAvatar>,
    last_error: Option<String>,
    revision: u64,
}

impl ViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: ClientEvent) {
        match event {
            ClientEvent::UiState(state) => self.state = state,
            ClientEvent::DiscordInfo(discord_info) => {
                self.avatars = extract_avatars(&discord_info);
                self.discord_info = discord_info;
            }
            ClientEvent::Avatars(avatars) => self.avatars = avatars,
            ClientEvent::Error(message) => {
                error!(error = %message, "ui stream reported an error");
                self.last_error = Some(message);
                return;
            }
        }
        self.revision += 1;
    }

    pub fn state(&self) -> &EloEloState {
        &self.state
    }

    pub fn shared_state(&self) -> Arc<EloEloState> {
        Arc::clone(&self.state)
    }

    pub fn discord_info(&self) -> &[DiscordPlayerInfo] {
        &self.discord_info
    }

    pub fn avatars(&self) -> &[PlayerAvatar] {
        &self.avatars
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Bumped on every state, discord or avatar push.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

use std::sync::Arc;

use eloelo_shared::{
    protocol::{DiscordPlayerInfo, PlayerAvatar},
    view::EloEloState,
};

pub mod config;
pub mod error;
pub mod present;
pub mod store;
pub mod stream;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::{OptionsFormError, TransportError};
pub use store::ViewStore;
pub use stream::{
    connect_ui_stream, BridgeEvent, EmbeddedEventListener, UiStreamSubscription,
};
pub use transport::{
    BridgeCall, CommandDispatcher, CommandTransport, EmbeddedBridgeTransport,
    HttpCommandTransport,
};

/// Everything the UI stream can push at the client.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    UiState(Arc<EloEloState>),
    DiscordInfo(Vec<DiscordPlayerInfo>),
    Avatars(Vec<PlayerAvatar>),
    Error(String),
}

impl ClientEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ClientEvent::UiState(_) => "ui_state",
            ClientEvent::DiscordInfo(_) => "discord_info",
            ClientEvent::Avatars(_) => "avatars",
            ClientEvent::Error(_) => "error",
        }
    }
}

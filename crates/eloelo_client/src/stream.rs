//! Inbound half of the client: the `ui_stream` WebSocket and its embedded
//! counterpart. Both publish [`ClientEvent`]s on a broadcast channel owned by
//! the caller, so subscribers must exist before connecting.

use std::sync::Arc;

use eloelo_shared::{
    protocol::{DiscordPlayerInfo, EloEloStateTransport, PlayerAvatar},
    view::{parse_elo_elo_state, parse_ui_stream_frame},
};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::{
    sync::{broadcast, mpsc},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};
use url::Url;

use crate::{config::ui_stream_url, error::TransportError, ClientEvent};

/// A live subscription. Closing or dropping it stops event delivery.
pub struct UiStreamSubscription {
    task: JoinHandle<()>,
}

impl UiStreamSubscription {
    pub fn close(&self) {
        if !self.task.is_finished() {
            info!("closing ui stream subscription");
        }
        self.task.abort();
    }

    pub fn is_closed(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for UiStreamSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn publish(events: &broadcast::Sender<ClientEvent>, event: ClientEvent) {
    debug!(kind = event.kind(), "publishing client event");
    // No receivers is fine; the UI may not be listening yet.
    let _ = events.send(event);
}

fn publish_frame(events: &broadcast::Sender<ClientEvent>, text: &str) {
    match parse_ui_stream_frame(text) {
        Ok(message) => {
            if let Some(err) = message.error {
                publish(events, ClientEvent::Error(err));
            }
            if let Some(state) = message.state {
                publish(events, ClientEvent::UiState(Arc::new(state)));
            }
            if let Some(discord_info) = message.discord_info {
                publish(events, ClientEvent::DiscordInfo(discord_info));
            }
        }
        Err(err) => publish(
            events,
            ClientEvent::Error(format!("Failed to decode ui stream frame: {err}")),
        ),
    }
}

/// Opens `api/v1/ui_stream` below `base_url` and forwards every frame.
///
/// The reader stops on the first socket error or close frame. There is no
/// reconnect.
pub async fn connect_ui_stream(
    base_url: &Url,
    events: broadcast::Sender<ClientEvent>,
) -> Result<UiStreamSubscription, TransportError> {
    let url = ui_stream_url(base_url)?;
    let (mut socket, _) =
        connect_async(url.as_str())
            .await
            .map_err(|source| TransportError::Connect {
                url: url.to_string(),
                source,
            })?;
    info!(%url, "ui stream connected");

    let task = tokio::spawn(async move {
        while let Some(message) = socket.next().await {
            match message {
                Ok(Message::Text(text)) => publish_frame(&events, &text),
                Ok(Message::Close(_)) => {
                    info!("ui stream closed by backend");
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(error = %err, "ui stream failed");
                    publish(&events, ClientEvent::Error(format!("Websocket error: {err}")));
                    break;
                }
            }
        }
    });

    Ok(UiStreamSubscription { task })
}

/// A named event emitted by an in-process backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeEvent {
    pub name: String,
    pub payload: Value,
}

impl BridgeEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

fn decode_payload<T: DeserializeOwned>(event: &str, payload: Value) -> Result<T, ClientEvent> {
    serde_json::from_value(payload)
        .map_err(|err| ClientEvent::Error(format!("Malformed {event} payload: {err}")))
}

/// Maps a bridge event to a client event. Unknown names yield `None`.
pub fn decode_bridge_event(event: BridgeEvent) -> Option<ClientEvent> {
    let BridgeEvent { name, payload } = event;
    let decoded = match name.as_str() {
        "update_ui" => decode_payload::<EloEloStateTransport>(&name, payload).and_then(|state| {
            parse_elo_elo_state(state)
                .map(|state| ClientEvent::UiState(Arc::new(state)))
                .map_err(|err| ClientEvent::Error(format!("Malformed update_ui payload: {err}")))
        }),
        "discord_info" => {
            decode_payload::<Vec<DiscordPlayerInfo>>(&name, payload).map(ClientEvent::DiscordInfo)
        }
        "avatars" => decode_payload::<Vec<PlayerAvatar>>(&name, payload).map(ClientEvent::Avatars),
        _ => {
            debug!(event = %name, "ignoring unknown bridge event");
            return None;
        }
    };
    Some(decoded.unwrap_or_else(|err| err))
}

/// Listener for a backend embedded in the same process.
pub struct EmbeddedEventListener;

impl EmbeddedEventListener {
    pub fn spawn(
        mut bridge_events: mpsc::Receiver<BridgeEvent>,
        events: broadcast::Sender<ClientEvent>,
    ) -> UiStreamSubscription {
        let task = tokio::spawn(async move {
            while let Some(event) = bridge_events.recv().await {
                if let Some(event) = decode_bridge_event(event) {
                    publish(&events, event);
                }
            }
            info!("embedded event bridge closed");
        });
        UiStreamSubscription { task }
    }
}

#[cfg(test)]
#[path = "tests/stream_tests.rs"]
mod tests;

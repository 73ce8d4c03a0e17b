//! Latest-snapshot slot shared between the stream forwarder and the UI.

use std::sync::{Arc, Mutex, MutexGuard};

use crossbeam_channel::Sender;
use eloelo_client::ClientEvent;
use eloelo_shared::view::EloEloState;

use crate::controller::events::UiEvent;

/// Holds only the newest state push. Older unread snapshots are overwritten,
/// so a stalled UI always resumes on the latest one.
#[derive(Clone, Default)]
pub struct LatestState {
    slot: Arc<Mutex<Option<Arc<EloEloState>>>>,
}

impl LatestState {
    fn lock(&self) -> MutexGuard<'_, Option<Arc<EloEloState>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn publish(&self, state: Arc<EloEloState>) {
        *self.lock() = Some(state);
    }

    pub fn take(&self) -> Option<Arc<EloEloState>> {
        self.lock().take()
    }
}

/// Routes one stream event: state pushes go to the slot, everything else
/// through the UI event queue.
pub fn forward_client_event(event: ClientEvent, latest: &LatestState, ui_tx: &Sender<UiEvent>) {
    match event {
        ClientEvent::UiState(state) => latest.publish(state),
        other => {
            let kind = other.kind();
            if ui_tx.try_send(UiEvent::Client(other)).is_err() {
                tracing::warn!(kind, "ui event queue unavailable, dropping stream event");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use eloelo_shared::domain::GameId;

    use super::*;

    fn state(game: &str) -> Arc<EloEloState> {
        Arc::new(EloEloState {
            selected_game: GameId::from(game),
            ..EloEloState::default()
        })
    }

    #[test]
    fn full_queue_still_ends_on_the_last_state() {
        let (ui_tx, ui_rx) = bounded(1);
        let latest = LatestState::default();
        forward_client_event(ClientEvent::Error("first".into()), &latest, &ui_tx);
        for game in ["a", "b", "c"] {
            forward_client_event(ClientEvent::UiState(state(game)), &latest, &ui_tx);
        }
        forward_client_event(ClientEvent::Avatars(Vec::new()), &latest, &ui_tx);

        assert_eq!(latest.take().map(|s| s.selected_game.clone()), Some(GameId::from("c")));
        assert!(latest.take().is_none());
        assert!(matches!(ui_rx.try_recv(), Ok(UiEvent::Client(ClientEvent::Error(_)))));
        assert!(ui_rx.try_recv().is_err());
    }
}

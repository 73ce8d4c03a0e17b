//! Runtime bridge between the UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use eloelo_client::{
    connect_ui_stream, ClientSettings, CommandDispatcher, HttpCommandTransport,
    UiStreamSubscription,
};
use eloelo_shared::protocol::UiCommand;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::backend_bridge::{
    commands::BackendCommand,
    latest::{forward_client_event, LatestState},
};
use crate::controller::events::{classify_startup_failure, UiError, UiErrorContext, UiEvent};

const STREAM_BUFFER: usize = 256;

fn report(ui_tx: &Sender<UiEvent>, context: UiErrorContext, message: impl Into<String>) {
    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(context, message)));
}

/// Connects the ui stream and forwards everything it publishes to the UI.
async fn open_stream(
    settings: &ClientSettings,
    latest: LatestState,
    ui_tx: &Sender<UiEvent>,
) -> anyhow::Result<UiStreamSubscription> {
    let base_url = settings.base_url()?;
    let (events, mut rx) = broadcast::channel(STREAM_BUFFER);
    let subscription = connect_ui_stream(&base_url, events).await?;

    let ui_tx = ui_tx.clone();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => forward_client_event(event, &latest, &ui_tx),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "ui stream forwarder lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
        tracing::debug!("ui stream forwarder stopped");
    });
    Ok(subscription)
}

pub fn launch(
    settings: ClientSettings,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    latest: LatestState,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                report(
                    &ui_tx,
                    UiErrorContext::BackendStartup,
                    classify_startup_failure(&format!("failed to build runtime: {err}")),
                );
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let transport = match HttpCommandTransport::from_settings(&settings) {
                Ok(transport) => transport,
                Err(err) => {
                    report(
                        &ui_tx,
                        UiErrorContext::BackendStartup,
                        classify_startup_failure(&err.to_string()),
                    );
                    tracing::error!(error = %err, "failed to build command transport");
                    return;
                }
            };
            let dispatcher =
                CommandDispatcher::new(Arc::new(transport), tokio::runtime::Handle::current());

            let subscription = match open_stream(&settings, latest, &ui_tx).await {
                Ok(subscription) => Some(subscription),
                Err(err) => {
                    report(
                        &ui_tx,
                        UiErrorContext::UiStream,
                        classify_startup_failure(&format!("{err:#}")),
                    );
                    tracing::error!(error = %format!("{err:#}"), "ui stream unavailable");
                    None
                }
            };

            dispatcher.dispatch(UiCommand::InitializeUi);
            if subscription.is_some() {
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Connected to {}",
                    settings.server_url
                )));
            }

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Remote(command) => {
                        dispatcher.dispatch(command);
                    }
                    BackendCommand::Shutdown => break,
                }
            }

            if let Some(subscription) = subscription {
                subscription.close();
            }
            tracing::info!("backend worker stopped");
        });
    })
}

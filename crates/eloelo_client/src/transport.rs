use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use eloelo_shared::protocol::UiCommand;
use reqwest::{header::CONTENT_TYPE, Client};
use serde_json::Value;
use tokio::{runtime::Handle, sync::mpsc, task::JoinHandle};
use tracing::{error, info};
use url::Url;

use crate::{
    config::{api_url, normalize_server_url, ClientSettings},
    error::TransportError,
};

const JSON_UTF8: &str = "application/json; charset=utf-8";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Delivers one named command to the backend.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn invoke(&self, command: &UiCommand) -> Result<(), TransportError>;
}

pub struct HttpCommandTransport {
    http: Client,
    base_url: Url,
}

impl HttpCommandTransport {
    /// `connect_timeout` bounds only connection setup. Once a command is on
    /// the wire it runs to completion; the backend is never cut off mid-handler.
    pub fn new(server_url: &str, connect_timeout: Duration) -> Result<Self, TransportError> {
        let base_url = normalize_server_url(server_url)?;
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(TransportError::Client)?;
        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, TransportError> {
        Self::new(&settings.server_url, CONNECT_TIMEOUT)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl CommandTransport for HttpCommandTransport {
    async fn invoke(&self, command: &UiCommand) -> Result<(), TransportError> {
        let name = command.name();
        let url = api_url(&self.base_url, name)?;
        info!(command = name, %url, "invoking command");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, JSON_UTF8)
            .json(&command.args())
            .send()
            .await
            .map_err(|source| TransportError::Request {
                command: name,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(command = name, %status, body = %body, "backend rejected command");
        }
        Ok(())
    }
}

/// A command handed to a host runtime that embeds the backend in-process.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeCall {
    pub name: &'static str,
    pub args: Value,
}

pub struct EmbeddedBridgeTransport {
    calls: mpsc::Sender<BridgeCall>,
}

impl EmbeddedBridgeTransport {
    pub fn new(calls: mpsc::Sender<BridgeCall>) -> Self {
        Self { calls }
    }
}

#[async_trait]
impl CommandTransport for EmbeddedBridgeTransport {
    async fn invoke(&self, command: &UiCommand) -> Result<(), TransportError> {
        let name = command.name();
        info!(command = name, "invoking embedded command");
        self.calls
            .send(BridgeCall {
                name,
                args: command.args(),
            })
            .await
            .map_err(|_| TransportError::BridgeClosed { command: name })
    }
}

/// Fire-and-forget front of a [`CommandTransport`].
///
/// Each dispatch runs as its own task. Failures are logged and dropped; the
/// next state push from the stream is the only feedback the UI gets.
#[derive(Clone)]
pub struct CommandDispatcher {
    transport: Arc<dyn CommandTransport>,
    runtime: Handle,
}

impl CommandDispatcher {
    pub fn new(transport: Arc<dyn CommandTransport>, runtime: Handle) -> Self {
        Self { transport, runtime }
    }

    pub fn dispatch(&self, command: UiCommand) -> JoinHandle<()> {
        let transport = Arc::clone(&self.transport);
        self.runtime.spawn(async move {
            if let Err(err) = transport.invoke(&command).await {
                error!(command = command.name(), error = %err, "command failed");
            }
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

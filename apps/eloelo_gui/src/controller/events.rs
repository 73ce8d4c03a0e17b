//! Backend-to-UI events and error modeling.

use eloelo_client::ClientEvent;

pub enum UiEvent {
    Info(String),
    Client(ClientEvent),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Stream,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    UiStream,
    Settings,
}

pub fn classify_startup_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build runtime") {
        "Backend worker startup failure; restart the app.".to_string()
    } else if lower.contains("invalid server url") || lower.contains("unsupported server url scheme") {
        format!("Server URL is not usable: {message}")
    } else if lower.contains("failed to connect")
        || lower.contains("connection refused")
        || lower.contains("dns")
        || lower.contains("timed out")
    {
        "Backend unreachable; check the server URL and restart.".to_string()
    } else {
        format!("Backend error: {message}")
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid option")
            || message_lower.contains("malformed")
            || message_lower.contains("missing")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connect")
            || message_lower.contains("network")
            || message_lower.contains("server url")
            || message_lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else if context == UiErrorContext::UiStream
            || message_lower.contains("websocket")
            || message_lower.contains("ui stream")
        {
            UiErrorCategory::Stream
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

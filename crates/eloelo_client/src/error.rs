use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("unsupported server url scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("command {command} failed to reach the backend: {source}")]
    Request {
        command: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("embedded bridge is closed, dropped command {command}")]
    BridgeClosed { command: &'static str },
    #[error("failed to connect ui stream at {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
}

/// Options form buffers that do not parse as their declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid option values: {}", .invalid_keys.join(", "))]
pub struct OptionsFormError {
    pub invalid_keys: Vec<String>,
}

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::TransportError;

const CONFIG_FILE_NAME: &str = "eloelo.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub log_filter: String,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:3000/ui/".into(),
            log_filter: "info".into(),
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    /// How long one-shot tools wait for a stream snapshot. Commands
    /// themselves are never timed out.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn base_url(&self) -> Result<Url, TransportError> {
        normalize_server_url(&self.server_url)
    }

    pub fn with_server_url_override(mut self, server_url: Option<String>) -> Self {
        if let Some(server_url) = server_url {
            self.server_url = server_url;
        }
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then `eloelo.toml`, then the environment.
pub fn load_settings() -> ClientSettings {
    let candidates = [
        Some(PathBuf::from(CONFIG_FILE_NAME)),
        dirs::config_dir().map(|dir| dir.join("eloelo").join(CONFIG_FILE_NAME)),
    ];
    load_settings_from(
        candidates.iter().flatten().map(PathBuf::as_path),
        |key| std::env::var(key).ok(),
    )
}

pub fn load_settings_from<'a>(
    config_paths: impl IntoIterator<Item = &'a Path>,
    env: impl Fn(&str) -> Option<String>,
) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Some((path, raw)) = config_paths
        .into_iter()
        .find_map(|path| fs::read_to_string(path).ok().map(|raw| (path, raw)))
    {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
                if let Some(v) = file_cfg.request_timeout_secs {
                    settings.request_timeout_secs = v;
                }
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring malformed config file");
            }
        }
    }

    if let Some(v) = env("ELOELO_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("ELOELO_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }

    settings
}

/// Parses the server url and makes sure it ends with `/` so relative joins
/// stay below it.
pub fn normalize_server_url(raw: &str) -> Result<Url, TransportError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(TransportError::UnsupportedScheme(other.to_string())),
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

pub fn api_url(base: &Url, name: &str) -> Result<Url, TransportError> {
    Ok(base.join(&format!("api/v1/{name}"))?)
}

/// `ws://` or `wss://` url of the ui stream below `base`.
pub fn ui_stream_url(base: &Url) -> Result<Url, TransportError> {
    let mut url = api_url(base, "ui_stream")?;
    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        other => return Err(TransportError::UnsupportedScheme(other.to_string())),
    };
    url.set_scheme(scheme)
        .map_err(|()| TransportError::UnsupportedScheme(scheme.to_string()))?;
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

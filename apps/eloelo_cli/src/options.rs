use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use eloelo_client::{
    connect_ui_stream,
    present::{OptionBuffer, OptionsForm},
    ClientEvent, ClientSettings, CommandTransport, HttpCommandTransport,
};
use eloelo_shared::{protocol::UiCommand, view::EloEloState};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub group: String,
    pub key: String,
    pub value: String,
}

pub fn parse_assignment(raw: &str) -> Result<Assignment> {
    let (path, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected GROUP.KEY=VALUE, got {raw:?}"))?;
    let (group, key) = path
        .trim()
        .split_once('.')
        .ok_or_else(|| anyhow!("option path {path:?} has no group"))?;
    if group.is_empty() || key.is_empty() {
        bail!("option path {path:?} is incomplete");
    }
    Ok(Assignment {
        group: group.to_string(),
        key: key.to_string(),
        value: value.to_string(),
    })
}

pub fn apply_assignments(form: &mut OptionsForm, assignments: &[Assignment]) -> Result<()> {
    for assignment in assignments {
        let buffer = form
            .buffer_mut(&assignment.group, &assignment.key)
            .ok_or_else(|| anyhow!("unknown option {}.{}", assignment.group, assignment.key))?;
        match buffer {
            OptionBuffer::Boolean(flag) => {
                *flag = assignment.value.trim().parse().with_context(|| {
                    format!(
                        "{}.{} expects true or false",
                        assignment.group, assignment.key
                    )
                })?;
            }
            OptionBuffer::Integer(text) | OptionBuffer::Decimal(text) | OptionBuffer::Text(text) => {
                *text = assignment.value.clone();
            }
        }
    }
    Ok(())
}

/// Subscribes, asks for a snapshot and waits for the first one.
async fn fetch_snapshot(settings: &ClientSettings) -> Result<Arc<EloEloState>> {
    let (events, mut rx) = broadcast::channel(16);
    let subscription = connect_ui_stream(&settings.base_url()?, events).await?;
    HttpCommandTransport::from_settings(settings)?
        .invoke(&UiCommand::InitializeUi)
        .await?;

    let wait = async {
        loop {
            match rx.recv().await {
                Ok(ClientEvent::UiState(state)) => return Ok(state),
                Ok(ClientEvent::Error(message)) => bail!("ui stream error: {message}"),
                Ok(other) => debug!(kind = other.kind(), "skipping event while waiting for state"),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => bail!("ui stream closed before a snapshot arrived"),
            }
        }
    };
    let result = tokio::time::timeout(settings.request_timeout(), wait)
        .await
        .context("timed out waiting for a ui snapshot");
    subscription.close();
    result?
}

pub async fn update_options(settings: &ClientSettings, raw_assignments: &[String]) -> Result<()> {
    let assignments = raw_assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>>>()?;

    let state = fetch_snapshot(settings).await?;
    let mut form = OptionsForm::from_groups(&state.options);
    apply_assignments(&mut form, &assignments)?;
    let command = form.save()?;

    HttpCommandTransport::from_settings(settings)?
        .invoke(&command)
        .await
        .context("failed to send options")?;
    println!("sent options ({} changed)", assignments.len());
    Ok(())
}
